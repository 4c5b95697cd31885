//! Last-known-good quantization parameters.

use std::sync::Mutex;

use crate::models::{Colorspace, TransformParams};

struct ParamState {
    colorspace: Colorspace,
    levels: Option<[u32; 3]>,
}

/// Holds the last validated quantization parameters.
///
/// Level updates are all-or-nothing: if any of the three text fields
/// fails to parse as a positive integer, the stored triple is left
/// completely unchanged and the previous values remain authoritative.
/// Colorspace selection comes from a closed set and never fails.
pub struct ParameterStore {
    state: Mutex<ParamState>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ParamState {
                colorspace: Colorspace::Rgb,
                levels: None,
            }),
        }
    }

    /// Parse three textual level fields and store them atomically.
    ///
    /// Returns false (and changes nothing) if any field is not a positive
    /// integer. Fields are trimmed first; UI text boxes carry whitespace.
    pub fn try_set_levels(&self, raw: [&str; 3]) -> bool {
        let mut parsed = [0u32; 3];
        for (slot, text) in parsed.iter_mut().zip(raw.iter()) {
            match text.trim().parse::<u32>() {
                Ok(value) if value > 0 => *slot = value,
                _ => {
                    tracing::debug!(fields = ?raw, "Rejected level edit");
                    return false;
                }
            }
        }

        let mut state = self.state.lock().expect("parameter store lock poisoned");
        state.levels = Some(parsed);
        true
    }

    pub fn set_colorspace(&self, colorspace: Colorspace) {
        let mut state = self.state.lock().expect("parameter store lock poisoned");
        state.colorspace = colorspace;
    }

    /// Current validated parameters, or `None` until the first successful
    /// level edit (the preview passes the rendition through unquantized).
    pub fn snapshot(&self) -> Option<TransformParams> {
        let state = self.state.lock().expect("parameter store lock poisoned");
        state.levels.map(|levels| TransformParams {
            colorspace: state.colorspace,
            levels,
        })
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}
