use std::convert::TryFrom;

/// One of the three supported temperature scales and its API encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    Imperial,
    Metric,
    Absolute,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
            UnitSystem::Absolute => "absolute",
        }
    }

    /// Unit symbol shown next to the temperature.
    pub fn symbol(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "°F",
            UnitSystem::Metric => "°C",
            UnitSystem::Absolute => "K",
        }
    }

    /// Value of the `units` request parameter the weather API expects.
    /// The API calls the absolute scale "standard".
    pub fn api_key(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
            UnitSystem::Absolute => "standard",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Imperial, UnitSystem::Metric, UnitSystem::Absolute]
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            "absolute" | "standard" => Ok(UnitSystem::Absolute),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported systems: imperial, metric, absolute."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for units in UnitSystem::all() {
            let s = units.as_str();
            let parsed = UnitSystem::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn absolute_maps_to_standard_api_key() {
        assert_eq!(UnitSystem::Absolute.api_key(), "standard");
        assert_eq!(UnitSystem::Absolute.symbol(), "K");
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvinish").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }
}
