//! Material name hashing
//!
//! Record ids are the lowercase hex MD5 digest of the material name as it is
//! authored in the 3D asset.

use md5::{Digest, Md5};

/// Compute the record id for a material name
pub fn material_id(material_name: &str) -> String {
    hex::encode(Md5::digest(material_name.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(material_id(""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(material_id("a"), "0cc175b9c0f1b6a831c399e269772661");
    }

    #[test]
    fn test_distinct_names_do_not_alias() {
        let names = ["Brick", "brick", "Brick ", "Timber", "Glass.001"];
        let mut ids: Vec<_> = names.iter().map(|n| material_id(n)).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), names.len());
    }
}
