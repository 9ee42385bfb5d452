//! Face state: the per-tick snapshot every modifier, layer and decorator reads.
//!
//! `FaceState` is a plain `Copy` value. The renderer keeps two of them and copies into
//! its buffers by value, so the "current" and "last drawn" buffers can never share
//! storage and a diff between them is always meaningful.

use crate::foundation::core::Rgb;

/// Emotion the face is expressing.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    /// No expression overlay.
    #[default]
    Neutral,
    /// Happy.
    Happy,
    /// Sleepy.
    Sleepy,
    /// Doubtful.
    Doubtful,
    /// Sad.
    Sad,
    /// Angry.
    Angry,
    /// Cold.
    Cold,
    /// Hot.
    Hot,
}

impl Emotion {
    /// Every emotion in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Neutral,
        Self::Happy,
        Self::Sleepy,
        Self::Doubtful,
        Self::Sad,
        Self::Angry,
        Self::Cold,
        Self::Hot,
    ];

    /// Upper-case name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "NEUTRAL",
            Self::Happy => "HAPPY",
            Self::Sleepy => "SLEEPY",
            Self::Doubtful => "DOUBTFUL",
            Self::Sad => "SAD",
            Self::Angry => "ANGRY",
            Self::Cold => "COLD",
            Self::Hot => "HOT",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Emotion {
    type Err = crate::foundation::error::FaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Self::Err::invalid_input(format!("unknown emotion '{s}'")))
    }
}

/// One eye.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct EyeState {
    /// Openness in `[0, 1]`.
    pub open: f64,
    /// Horizontal gaze offset.
    pub gaze_x: f64,
    /// Vertical gaze offset.
    pub gaze_y: f64,
}

impl Default for EyeState {
    fn default() -> Self {
        Self {
            open: 1.0,
            gaze_x: 0.0,
            gaze_y: 0.0,
        }
    }
}

/// Both eyes.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Eyes {
    /// Left eye (viewer's right).
    pub left: EyeState,
    /// Right eye (viewer's left).
    pub right: EyeState,
}

impl Eyes {
    /// Mutable access to both eyes, left first.
    pub fn each_mut(&mut self) -> [&mut EyeState; 2] {
        [&mut self.left, &mut self.right]
    }
}

/// Mouth.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MouthState {
    /// Openness in `[0, 1]`.
    pub open: f64,
}

/// Which theme color a layer or decorator paints with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeColor {
    /// Foreground.
    #[default]
    Primary,
    /// Background.
    Secondary,
}

/// Foreground/background color pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// Foreground color.
    pub primary: Rgb,
    /// Background color.
    pub secondary: Rgb,
}

impl Theme {
    /// Color selected by name.
    pub fn get(&self, which: ThemeColor) -> Rgb {
        match which {
            ThemeColor::Primary => self.primary,
            ThemeColor::Secondary => self.secondary,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: [0xff, 0xff, 0xff],
            secondary: [0x00, 0x00, 0x00],
        }
    }
}

/// Physiological and drawing state of the face for one tick.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FaceState {
    /// Mouth.
    pub mouth: MouthState,
    /// Eyes.
    pub eyes: Eyes,
    /// Breath oscillator output; layers bob by `breath * 3` pixels.
    pub breath: f64,
    /// Current emotion.
    pub emotion: Emotion,
    /// Color theme.
    pub theme: Theme,
}

impl Default for FaceState {
    fn default() -> Self {
        Self {
            mouth: MouthState::default(),
            eyes: Eyes::default(),
            breath: 1.0,
            emotion: Emotion::Neutral,
            theme: Theme::default(),
        }
    }
}

/// Outcome of comparing a freshly modified state against the last drawn one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceDiff {
    /// The theme changed; the whole surface must be repainted.
    pub should_clear: bool,
    /// Some field changed; the base face must be redrawn.
    pub should_render: bool,
}

impl FaceState {
    /// Overwrite every field of `self` with the corresponding field of `src`.
    pub fn copy_from(&mut self, src: &FaceState) {
        *self = *src;
    }

    /// Field-by-field equality. Any NaN makes the states unequal.
    pub fn same_as(&self, other: &FaceState) -> bool {
        fn eye_eq(a: &EyeState, b: &EyeState) -> bool {
            a.open == b.open && a.gaze_x == b.gaze_x && a.gaze_y == b.gaze_y
        }

        self.mouth.open == other.mouth.open
            && eye_eq(&self.eyes.left, &other.eyes.left)
            && eye_eq(&self.eyes.right, &other.eyes.right)
            && self.breath == other.breath
            && self.emotion == other.emotion
            && self.theme == other.theme
    }

    /// Redraw decision for `self` (just produced) against `last` (last drawn).
    pub fn diff(&self, last: &FaceState) -> FaceDiff {
        FaceDiff {
            should_clear: self.theme != last.theme,
            should_render: !self.same_as(last),
        }
    }
}

impl PartialEq for FaceState {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/face.rs"]
mod tests;
