//! Format-code caching.
//!
//! Workbooks reuse a handful of format codes across thousands of cells, and
//! a compiled [`CellFormat`] is immutable, so a small global LRU pays for
//! itself immediately.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::ast::CellFormat;

static CACHE: Mutex<Option<LruCache<String, CellFormat>>> = Mutex::new(None);

const CACHE_SIZE: usize = 256;

/// Parse a format code through the global cache.
pub fn parse_cached(format_code: &str) -> CellFormat {
    let mut guard = CACHE.lock().unwrap();

    let cache = guard
        .get_or_insert_with(|| LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap()));

    if let Some(cf) = cache.get(format_code) {
        return cf.clone();
    }

    let cf = CellFormat::parse(format_code);
    cache.put(format_code.to_string(), cf.clone());
    cf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_parse_matches_direct_parse() {
        let direct = CellFormat::parse("#,##0.00;(#,##0.00)");
        assert_eq!(parse_cached("#,##0.00;(#,##0.00)"), direct);
        // second hit comes from the cache
        assert_eq!(parse_cached("#,##0.00;(#,##0.00)"), direct);
    }
}
