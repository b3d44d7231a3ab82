// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-wide pools, one per backend

use crate::{PoolStrategy, SharedPool};
use sonda_formats::{HalVector, JsonVector, UrlVector, XmlVector};
use std::sync::LazyLock;

static JSON: LazyLock<SharedPool<JsonVector>> =
    LazyLock::new(|| SharedPool::new("jsonvector", PoolStrategy::Unbounded));
static XML: LazyLock<SharedPool<XmlVector>> =
    LazyLock::new(|| SharedPool::new("xmlvector", PoolStrategy::Unbounded));
static URL: LazyLock<SharedPool<UrlVector>> =
    LazyLock::new(|| SharedPool::new("urlvector", PoolStrategy::Unbounded));
static HAL: LazyLock<SharedPool<HalVector>> =
    LazyLock::new(|| SharedPool::new("halvector", PoolStrategy::Unbounded));

/// Shared JSON document pool
#[must_use]
pub fn json_pool() -> &'static SharedPool<JsonVector> {
    &JSON
}

/// Shared XML document pool
#[must_use]
pub fn xml_pool() -> &'static SharedPool<XmlVector> {
    &XML
}

/// Shared URL document pool
#[must_use]
pub fn url_pool() -> &'static SharedPool<UrlVector> {
    &URL
}

/// Shared Accept-Language document pool
#[must_use]
pub fn hal_pool() -> &'static SharedPool<HalVector> {
    &HAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonda_core::{Document, Encoding};

    #[test]
    fn test_global_pools_are_named() {
        assert_eq!(json_pool().name(), "jsonvector");
        assert_eq!(xml_pool().name(), "xmlvector");
        assert_eq!(url_pool().name(), "urlvector");
        assert_eq!(hal_pool().name(), "halvector");
    }

    #[test]
    fn test_global_pools_hand_out_their_backend() {
        assert_eq!(json_pool().acquire().encoding(), Encoding::Json);
        assert_eq!(xml_pool().acquire().encoding(), Encoding::Xml);
        assert_eq!(url_pool().acquire().encoding(), Encoding::Url);
        assert_eq!(hal_pool().acquire().encoding(), Encoding::Hal);
    }

    #[test]
    fn test_url_pool_clears_url_parts() {
        let mut doc = url_pool().acquire();
        doc.parse(b"https://example.com/?a=1").unwrap();
        doc.release();
        let doc = url_pool().acquire();
        assert_eq!(doc.host(), None);
    }
}
