//! Fixed table of supported localities.
//!
//! Keys are short lowercase codes used in URLs; canonical names are the
//! official county/city names the open-data datasets are keyed by.

use crate::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locality {
    pub key: &'static str,
    pub canonical_name: &'static str,
}

const fn loc(key: &'static str, canonical_name: &'static str) -> Locality {
    Locality { key, canonical_name }
}

pub const LOCALITIES: [Locality; 22] = [
    loc("taipei", "臺北市"),
    loc("newtaipei", "新北市"),
    loc("taoyuan", "桃園市"),
    loc("taichung", "臺中市"),
    loc("tainan", "臺南市"),
    loc("kaohsiung", "高雄市"),
    loc("keelung", "基隆市"),
    loc("hsinchu", "新竹市"),
    loc("hsinchucounty", "新竹縣"),
    loc("miaoli", "苗栗縣"),
    loc("changhua", "彰化縣"),
    loc("nantou", "南投縣"),
    loc("yunlin", "雲林縣"),
    loc("chiayi", "嘉義市"),
    loc("chiayicounty", "嘉義縣"),
    loc("pingtung", "屏東縣"),
    loc("yilan", "宜蘭縣"),
    loc("hualien", "花蓮縣"),
    loc("taitung", "臺東縣"),
    loc("penghu", "澎湖縣"),
    loc("kinmen", "金門縣"),
    loc("lienchiang", "連江縣"),
];

/// All valid keys, in table order.
pub fn all_keys() -> Vec<&'static str> {
    LOCALITIES.iter().map(|l| l.key).collect()
}

/// Look up a locality by key, ignoring case. Any other difference, including
/// surrounding whitespace, is a miss.
pub fn resolve(key: &str) -> Result<&'static Locality, WeatherError> {
    let lower = key.to_lowercase();

    LOCALITIES
        .iter()
        .find(|l| l.key == lower)
        .ok_or_else(|| WeatherError::UnknownLocality {
            key: key.to_string(),
            available: all_keys(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_in_any_case() {
        for l in &LOCALITIES {
            assert_eq!(resolve(l.key).unwrap(), l);
            assert_eq!(resolve(&l.key.to_uppercase()).unwrap(), l);
        }
    }

    #[test]
    fn mixed_case_resolves() {
        let l = resolve("KaoHsiung").expect("known key");
        assert_eq!(l.canonical_name, "高雄市");
    }

    #[test]
    fn keys_are_unique_and_lowercase() {
        let mut keys = all_keys();
        assert_eq!(keys.len(), 22);
        assert!(keys.iter().all(|k| *k == k.to_lowercase()));
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 22);
    }

    #[test]
    fn unknown_key_lists_all_valid_keys() {
        let err = resolve("atlantis").unwrap_err();
        match err {
            WeatherError::UnknownLocality { key, available } => {
                assert_eq!(key, "atlantis");
                assert_eq!(available, all_keys());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_key_is_unknown() {
        assert!(matches!(
            resolve(""),
            Err(WeatherError::UnknownLocality { .. })
        ));
    }

    #[test]
    fn surrounding_whitespace_is_not_stripped() {
        for key in [" taipei", "taipei\t", " Taipei "] {
            match resolve(key) {
                Err(WeatherError::UnknownLocality { key: echoed, available }) => {
                    assert_eq!(echoed, key);
                    assert_eq!(available, all_keys());
                }
                other => panic!("{key:?} should be unknown, got {other:?}"),
            }
        }
    }
}
