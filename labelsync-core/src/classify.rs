//! Label classification.
//!
//! Precedence (first match wins):
//! 1. `Standard`: the name, lowercased, is canonical (color is ignored)
//! 2. `Custom`: the color falls inside the hand-picked band
//! 3. `Renamed`: the color equals a canonical color
//! 4. `Garbage`

use std::fmt;

use crate::reference::ReferenceSet;
use crate::types::{RemoteLabel, Rgb};

/// Classification of one remote label against the reference set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Standard,
    /// Left uncolored-unchanged; carries the live channels for the audit log.
    Custom(Rgb),
    /// A canonical label that drifted to another name; `canonical` is the
    /// reference name sharing its color.
    Renamed { canonical: String },
    Garbage,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Standard => write!(f, "standard"),
            Classification::Custom(_) => write!(f, "custom"),
            Classification::Renamed { canonical } => write!(f, "renamed ({canonical})"),
            Classification::Garbage => write!(f, "garbage"),
        }
    }
}

/// Classify `label` in strict priority order.
pub fn classify(label: &RemoteLabel, reference: &ReferenceSet) -> Classification {
    if is_standard(label, reference) {
        return Classification::Standard;
    }
    if let Some(rgb) = label.rgb().filter(|rgb| in_custom_band(*rgb)) {
        return Classification::Custom(rgb);
    }
    match reference.name_for_color(&label.color) {
        Some(canonical) => Classification::Renamed {
            canonical: canonical.to_owned(),
        },
        None => Classification::Garbage,
    }
}

/// Low-saturation band reserved for intentionally hand-picked colors.
pub fn in_custom_band(rgb: Rgb) -> bool {
    rgb.red <= 100 && (40..=140).contains(&rgb.green) && (20..=120).contains(&rgb.blue)
}

pub fn is_standard(label: &RemoteLabel, reference: &ReferenceSet) -> bool {
    reference.contains(&label.name)
}

/// Not standard, and the color parses and lies in the custom band.
pub fn is_custom(label: &RemoteLabel, reference: &ReferenceSet) -> bool {
    !is_standard(label, reference) && label.rgb().is_some_and(in_custom_band)
}

/// Not standard, but the color equals some canonical color.
///
/// Independent of [`is_custom`]; [`classify`] resolves the overlap in favour of custom.
pub fn is_renamed(label: &RemoteLabel, reference: &ReferenceSet) -> bool {
    !is_standard(label, reference) && reference.name_for_color(&label.color).is_some()
}

/// Neither standard nor custom. Includes renamed labels.
pub fn is_garbage(label: &RemoteLabel, reference: &ReferenceSet) -> bool {
    !is_standard(label, reference) && !is_custom(label, reference)
}
