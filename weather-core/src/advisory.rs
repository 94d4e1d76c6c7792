//! Clothing advice from the temperature-difference index and today's bounds.
//!
//! Both modes are ordered cascades: rules are tried top to bottom and the
//! first one that applies decides. Rule order is part of the contract.

use crate::model::ClothingAdvice;

/// A fixed bilingual message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub name: &'static str,
    pub zh: &'static str,
    pub en: &'static str,
}

impl From<Advice> for ClothingAdvice {
    fn from(advice: Advice) -> Self {
        ClothingAdvice {
            zh: advice.zh.to_string(),
            en: advice.en.to_string(),
        }
    }
}

pub struct Rule<C: 'static> {
    pub when: fn(&C) -> bool,
    pub advice: Advice,
}

pub struct Cascade<C: 'static> {
    pub rules: &'static [Rule<C>],
    pub otherwise: Advice,
}

impl<C: 'static> Cascade<C> {
    pub fn evaluate(&self, input: &C) -> Advice {
        self.rules
            .iter()
            .find(|rule| (rule.when)(input))
            .map(|rule| rule.advice)
            .unwrap_or(self.otherwise)
    }

    /// Every message this cascade can produce, in evaluation order.
    pub fn outcomes(&self) -> impl Iterator<Item = Advice> + '_ {
        self.rules
            .iter()
            .map(|rule| rule.advice)
            .chain(std::iter::once(self.otherwise))
    }
}

/// Input of the temperature-aware cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    pub index: i64,
    pub max_temp: f64,
    pub min_temp: f64,
}

pub const HOT_ALL_DAY: Advice = Advice {
    name: "hot-all-day",
    zh: "全天炎熱，請穿著透氣排汗的衣物，並記得多補充水分。",
    en: "Hot all day. Wear breathable clothing and stay hydrated.",
};

pub const HOT_DAY_COOL_NIGHT: Advice = Advice {
    name: "hot-day-cool-night",
    zh: "白天炎熱、早晚稍涼，建議短袖搭配一件薄外套。",
    en: "Hot during the day and cooler at night. Short sleeves with a thin layer are recommended.",
};

pub const EXTREME_SWING: Advice = Advice {
    name: "extreme-swing",
    zh: "今日溫差極大，建議採洋蔥式穿搭，方便隨時增減衣物。",
    en: "Extreme temperature swing today. Dress in layers (onion-style) so you can adjust easily.",
};

pub const NOTICEABLE_SWING: Advice = Advice {
    name: "noticeable-swing",
    zh: "今日溫差明顯，外出建議攜帶一件輕便外套。",
    en: "Noticeable temperature swing today. Carry a light jacket.",
};

pub const HOT: Advice = Advice {
    name: "hot",
    zh: "天氣炎熱，建議穿著短袖等清涼衣物。",
    en: "Hot weather. Short sleeves and light clothing are recommended.",
};

pub const COMFORTABLE: Advice = Advice {
    name: "comfortable",
    zh: "天氣舒適，短袖或薄長袖皆適宜。",
    en: "Comfortable weather. Short sleeves or a light long-sleeve top will do.",
};

pub const SLIGHTLY_COOL: Advice = Advice {
    name: "slightly-cool",
    zh: "天氣稍涼，建議穿著長袖或加件背心。",
    en: "Slightly cool. Wear long sleeves or add a vest.",
};

pub const COLD: Advice = Advice {
    name: "cold",
    zh: "天氣寒冷，請穿著保暖衣物並加穿外套。",
    en: "Cold weather. Wear warm clothing and a jacket.",
};

pub const INDEX_EXTREME: Advice = Advice {
    name: "index-extreme",
    zh: "溫差極大，建議洋蔥式穿搭。",
    en: "Extreme temperature swing. Dress in layers.",
};

pub const INDEX_MODERATE: Advice = Advice {
    name: "index-moderate",
    zh: "溫差較大，建議攜帶外套。",
    en: "Large temperature swing. Bring a jacket.",
};

pub const INDEX_COMFORTABLE: Advice = Advice {
    name: "index-comfortable",
    zh: "溫差不大，依平常習慣穿著即可。",
    en: "Mild temperature swing. Dress as you normally would.",
};

/// Used when the dataset has no usable record for the locality.
pub const NO_DATA: Advice = Advice {
    name: "no-data",
    zh: "目前查無溫差資料，請依實際天氣調整穿著。",
    en: "No temperature difference data available. Dress for the current weather.",
};

pub const TEMPERATURE_AWARE: Cascade<Conditions> = Cascade {
    rules: &[
        Rule {
            when: |c: &Conditions| c.min_temp >= 26.0,
            advice: HOT_ALL_DAY,
        },
        Rule {
            when: |c: &Conditions| c.max_temp >= 30.0 && c.min_temp <= 25.0,
            advice: HOT_DAY_COOL_NIGHT,
        },
        Rule {
            when: |c: &Conditions| c.index >= 10,
            advice: EXTREME_SWING,
        },
        Rule {
            when: |c: &Conditions| c.index >= 6,
            advice: NOTICEABLE_SWING,
        },
        Rule {
            when: |c: &Conditions| c.max_temp > 30.0,
            advice: HOT,
        },
        Rule {
            when: |c: &Conditions| c.max_temp >= 25.0,
            advice: COMFORTABLE,
        },
        Rule {
            when: |c: &Conditions| c.max_temp >= 20.0,
            advice: SLIGHTLY_COOL,
        },
    ],
    otherwise: COLD,
};

pub const INDEX_ONLY: Cascade<i64> = Cascade {
    rules: &[
        Rule {
            when: |index: &i64| *index >= 10,
            advice: INDEX_EXTREME,
        },
        Rule {
            when: |index: &i64| *index >= 6,
            advice: INDEX_MODERATE,
        },
    ],
    otherwise: INDEX_COMFORTABLE,
};

/// Pick the clothing advice for a day.
///
/// Uses the temperature-aware cascade when both bounds are known, the
/// index-only cascade otherwise.
pub fn advise(index: i64, max_temp: Option<f64>, min_temp: Option<f64>) -> ClothingAdvice {
    let advice = match (max_temp, min_temp) {
        (Some(max_temp), Some(min_temp)) => TEMPERATURE_AWARE.evaluate(&Conditions {
            index,
            max_temp,
            min_temp,
        }),
        _ => INDEX_ONLY.evaluate(&index),
    };
    advice.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aware(index: i64, max: f64, min: f64) -> Advice {
        TEMPERATURE_AWARE.evaluate(&Conditions {
            index,
            max_temp: max,
            min_temp: min,
        })
    }

    #[test]
    fn hot_night_beats_extreme_index() {
        assert_eq!(advise(12, Some(32.0), Some(27.0)), ClothingAdvice::from(HOT_ALL_DAY));
    }

    #[test]
    fn hot_day_cool_night_beats_index_rules() {
        assert_eq!(aware(12, 30.0, 25.0), HOT_DAY_COOL_NIGHT);
        assert_eq!(aware(7, 33.0, 18.0), HOT_DAY_COOL_NIGHT);
    }

    #[test]
    fn index_rules_beat_max_temp_tiers() {
        assert_eq!(aware(10, 22.0, 12.0), EXTREME_SWING);
        assert_eq!(aware(6, 22.0, 12.0), NOTICEABLE_SWING);
        assert_eq!(aware(5, 22.0, 12.0), SLIGHTLY_COOL);
    }

    #[test]
    fn max_temp_tiers() {
        // 30 < max with a warm night between the first two rules' bounds
        assert_eq!(aware(0, 31.0, 25.5), HOT);
        assert_eq!(aware(0, 29.9, 22.0), COMFORTABLE);
        assert_eq!(aware(0, 25.0, 20.0), COMFORTABLE);
        assert_eq!(aware(0, 24.9, 18.0), SLIGHTLY_COOL);
        assert_eq!(aware(0, 20.0, 15.0), SLIGHTLY_COOL);
        assert_eq!(aware(0, 19.9, 12.0), COLD);
        assert_eq!(aware(-3, 8.0, 2.0), COLD);
    }

    #[test]
    fn index_only_mode() {
        assert_eq!(advise(6, None, None), ClothingAdvice::from(INDEX_MODERATE));
        assert_eq!(advise(10, None, None), ClothingAdvice::from(INDEX_EXTREME));
        assert_eq!(advise(0, None, None), ClothingAdvice::from(INDEX_COMFORTABLE));
        assert_eq!(advise(5, None, None), ClothingAdvice::from(INDEX_COMFORTABLE));
    }

    #[test]
    fn one_missing_bound_falls_back_to_index_only() {
        assert_eq!(advise(11, Some(35.0), None), ClothingAdvice::from(INDEX_EXTREME));
        assert_eq!(advise(11, None, Some(28.0)), ClothingAdvice::from(INDEX_EXTREME));
    }

    #[test]
    fn rule_order_is_stable() {
        let names: Vec<_> = TEMPERATURE_AWARE.outcomes().map(|a| a.name).collect();
        assert_eq!(
            names,
            [
                "hot-all-day",
                "hot-day-cool-night",
                "extreme-swing",
                "noticeable-swing",
                "hot",
                "comfortable",
                "slightly-cool",
                "cold",
            ]
        );

        let names: Vec<_> = INDEX_ONLY.outcomes().map(|a| a.name).collect();
        assert_eq!(names, ["index-extreme", "index-moderate", "index-comfortable"]);
    }

    #[test]
    fn every_outcome_is_fully_bilingual() {
        let all = TEMPERATURE_AWARE
            .outcomes()
            .chain(INDEX_ONLY.outcomes())
            .chain(std::iter::once(NO_DATA));

        for advice in all {
            let out = ClothingAdvice::from(advice);
            assert!(!out.zh.trim().is_empty(), "{}", advice.name);
            assert!(!out.en.trim().is_empty(), "{}", advice.name);
            assert!(
                !out.zh.chars().chain(out.en.chars()).any(|c| c.is_ascii_digit()),
                "{} embeds a number",
                advice.name
            );
        }
    }
}
