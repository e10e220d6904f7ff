use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formatting locale for currency amounts, grouped numbers and short dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "de-DE")]
    DeDe,
}

/// Field order of a short date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    MonthDayYear,
    DayMonthYear,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::FrFr => "fr-FR",
            Locale::DeDe => "de-DE",
        }
    }

    pub fn group_separator(self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ",",
            Locale::FrFr => "\u{202f}", // narrow no-break space
            Locale::DeDe => ".",
        }
    }

    pub fn decimal_separator(self) -> &'static str {
        match self {
            Locale::EnUs | Locale::EnGb => ".",
            Locale::FrFr | Locale::DeDe => ",",
        }
    }

    pub fn date_order(self) -> DateOrder {
        match self {
            Locale::EnUs => DateOrder::MonthDayYear,
            Locale::EnGb | Locale::FrFr | Locale::DeDe => DateOrder::DayMonthYear,
        }
    }

    pub fn date_separator(self) -> char {
        match self {
            Locale::DeDe => '.',
            _ => '/',
        }
    }

    /// Places the USD symbol around an already grouped, unsigned amount.
    pub fn wrap_usd(self, amount: &str, negative: bool) -> String {
        let sign = if negative { "-" } else { "" };
        match self {
            Locale::EnUs => format!("{sign}${amount}"),
            Locale::EnGb => format!("{sign}US${amount}"),
            Locale::FrFr => format!("{sign}{amount}\u{a0}$US"),
            Locale::DeDe => format!("{sign}{amount}\u{a0}$"),
        }
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "fr" | "fr-fr" => Ok(Locale::FrFr),
            "de" | "de-de" => Ok(Locale::DeDe),
            _ => anyhow::bail!(
                "Invalid DASHBOARD_LOCALE: {}. Must be 'en-US', 'en-GB', 'fr-FR', or 'de-DE'",
                s
            ),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!(Locale::from_str("en-US").unwrap(), Locale::EnUs);
        assert_eq!(Locale::from_str("EN_gb").unwrap(), Locale::EnGb);
        assert_eq!(Locale::from_str(" fr ").unwrap(), Locale::FrFr);
        assert_eq!(Locale::from_str("de-DE").unwrap(), Locale::DeDe);
        assert!(Locale::from_str("pt-BR").is_err());
    }

    #[test]
    fn test_wrap_usd_placement() {
        assert_eq!(Locale::EnUs.wrap_usd("5.00", true), "-$5.00");
        assert_eq!(Locale::EnGb.wrap_usd("5.00", false), "US$5.00");
        assert_eq!(Locale::DeDe.wrap_usd("5,00", false), "5,00\u{a0}$");
    }
}
