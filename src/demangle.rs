//! Recovery of source-level method names from translator-encoded ones.
//!
//! The translator appends a marker character to names it had to
//! disambiguate or tag as generic. The exact character depends on the
//! target, since not every host accepts the same characters in
//! identifiers, so every known alternate is recognized here.

/// Marker alternates, in match priority order.
pub const NAME_MARKERS: [char; 4] = ['\u{00AB}', '\u{00A1}', '(', '!'];

/// Alternates that tag a generic method when they terminate a name.
pub const GENERIC_SUFFIX_MARKERS: [char; 2] = ['\u{00A1}', '!'];

/// Returns the logical (source-level) name for a raw host method name by
/// truncating at the first marker. Names without a marker pass through
/// unchanged.
pub fn logical_name(raw: &str) -> &str {
    for marker in NAME_MARKERS {
        if let Some(index) = raw.find(marker) {
            return &raw[..index];
        }
    }
    raw
}

/// Whether a raw name carries the trailing generic-suffix marker.
pub fn has_generic_suffix(raw: &str) -> bool {
    raw.ends_with(&GENERIC_SUFFIX_MARKERS[..])
}
