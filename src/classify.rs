//! Severity bands for run-cycle telemetry readings.
//!
//! Thresholds mirror the analytics service: spindle temperature warns above
//! 75 and goes critical above 90, vibration at 2.0 / 3.5, power draw at
//! 350 / 400. Inspection is categorical.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandLevel {
    Normal,
    Elevated,
    Critical,
}

impl BandLevel {
    pub fn color(&self) -> &'static str {
        match self {
            BandLevel::Normal => "#2f9e44",
            BandLevel::Elevated => "#f59f00",
            BandLevel::Critical => "#e03131",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub level: BandLevel,
    pub label: &'static str,
    pub detail: &'static str,
}

pub fn spindle_temp_band(temp: f64) -> Band {
    if temp > 90.0 {
        Band {
            level: BandLevel::Critical,
            label: "Warning! High temperature",
            detail: "Spindle is running over 90 C. Halt the cycle and check coolant flow.",
        }
    } else if temp > 75.0 {
        Band {
            level: BandLevel::Elevated,
            label: "Spindle temperature slightly high",
            detail: "Running warm, between 75 C and 90 C. Keep the spindle under watch.",
        }
    } else {
        Band {
            level: BandLevel::Normal,
            label: "Spindle temperature normal",
            detail: "Within the expected operating range below 75 C.",
        }
    }
}

pub fn vibration_band(vib: f64) -> Band {
    if vib > 3.5 {
        Band {
            level: BandLevel::Critical,
            label: "Severe vibration",
            detail: "Vibration above 3.5 mm/s. Stop the machine and inspect tool and mounting.",
        }
    } else if vib > 2.0 {
        Band {
            level: BandLevel::Elevated,
            label: "Vibration elevated",
            detail: "Vibration between 2.0 and 3.5 mm/s. Possible tool wear.",
        }
    } else {
        Band {
            level: BandLevel::Normal,
            label: "Vibration normal",
            detail: "Vibration within the expected band below 2.0 mm/s.",
        }
    }
}

pub fn power_draw_band(power: f64) -> Band {
    if power > 400.0 {
        Band {
            level: BandLevel::Critical,
            label: "Power draw critical",
            detail: "Draw above 400 W. Possible overload or firmware tampering.",
        }
    } else if power > 350.0 {
        Band {
            level: BandLevel::Elevated,
            label: "Power draw elevated",
            detail: "Draw between 350 W and 400 W. Load is higher than the cycle plan expects.",
        }
    } else {
        Band {
            level: BandLevel::Normal,
            label: "Power draw normal",
            detail: "Draw within the expected band below 350 W.",
        }
    }
}

pub fn inspection_band(verdict: &str) -> Band {
    match verdict {
        "PASS" => Band {
            level: BandLevel::Normal,
            label: "Part passed inspection",
            detail: "Quality control accepted the part.",
        },
        "FAIL" => Band {
            level: BandLevel::Critical,
            label: "Part failed inspection",
            detail: "Quality control rejected the part. Quarantine it for review.",
        },
        _ => Band {
            level: BandLevel::Elevated,
            label: "Inspection verdict unclear",
            detail: "The inspection station returned an unrecognized verdict.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spindle_temp_bands_match_thresholds() {
        assert_eq!(spindle_temp_band(95.0).label, "Warning! High temperature");
        assert_eq!(spindle_temp_band(95.0).level, BandLevel::Critical);
        assert_eq!(spindle_temp_band(80.0).label, "Spindle temperature slightly high");
        assert_eq!(spindle_temp_band(80.0).level, BandLevel::Elevated);
        assert_eq!(spindle_temp_band(50.0).label, "Spindle temperature normal");
        assert_eq!(spindle_temp_band(50.0).level, BandLevel::Normal);
    }

    #[test]
    fn spindle_temp_boundaries() {
        // 75 and 90 are the last values of their lower bands.
        assert_eq!(spindle_temp_band(75.0).level, BandLevel::Normal);
        assert_eq!(spindle_temp_band(90.0).level, BandLevel::Elevated);
    }

    #[test]
    fn vibration_bands() {
        assert_eq!(vibration_band(3.9).level, BandLevel::Critical);
        assert_eq!(vibration_band(2.5).level, BandLevel::Elevated);
        assert_eq!(vibration_band(0.8).level, BandLevel::Normal);
    }

    #[test]
    fn power_bands() {
        assert_eq!(power_draw_band(420.0).level, BandLevel::Critical);
        assert_eq!(power_draw_band(360.0).level, BandLevel::Elevated);
        assert_eq!(power_draw_band(310.0).level, BandLevel::Normal);
    }

    #[test]
    fn inspection_bands() {
        assert_eq!(inspection_band("PASS").level, BandLevel::Normal);
        assert_eq!(inspection_band("FAIL").level, BandLevel::Critical);
        assert_eq!(inspection_band("MAYBE").level, BandLevel::Elevated);
    }
}
