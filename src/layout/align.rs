//! Alignment policies for body lines.
//!
//! Headings are always centred and blank lines always left-aligned; every
//! other wrapped line asks an [`AlignmentPolicy`].

use crate::model::Alignment;
use crate::parser::is_all_caps;

/// Bullet characters recognised at the start of a list item.
pub const LIST_BULLETS: [char; 6] = ['•', '-', '*', '●', '○', '▪'];

/// Classification of the source line a wrapped line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Empty or whitespace only
    Blank,
    /// At least one uppercase letter, no lowercase
    AllCaps,
    /// Anything else
    Text,
}

impl LineClass {
    /// Classify a source line.
    pub fn of(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            LineClass::Blank
        } else if is_all_caps(trimmed) {
            LineClass::AllCaps
        } else {
            LineClass::Text
        }
    }
}

/// What a policy knows about the line being placed.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// Wrapped line text
    pub text: &'a str,
    /// Class of the source line
    pub class: LineClass,
    /// This line was broken by the width limit
    pub forced: bool,
    /// `forced` of the previous body line, `None` at document start
    pub prev_forced: Option<bool>,
    /// First body line of the document
    pub is_first: bool,
}

impl LineContext<'_> {
    /// Check if the line starts with a digit or a list bullet.
    pub fn starts_with_list_marker(&self) -> bool {
        self.text
            .trim_start()
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit() || LIST_BULLETS.contains(&c))
    }

    /// This line and the one before it both ended before the width limit.
    fn in_short_run(&self) -> bool {
        !self.forced && self.prev_forced == Some(false)
    }
}

/// Decides whether a body line is centred.
pub trait AlignmentPolicy {
    /// Alignment for `line`.
    fn align(&mut self, line: &LineContext<'_>) -> Alignment;

    /// Short name for logs.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<P: AlignmentPolicy + ?Sized> AlignmentPolicy for Box<P> {
    fn align(&mut self, line: &LineContext<'_>) -> Alignment {
        (**self).align(line)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

fn center_if(cond: bool) -> Alignment {
    if cond {
        Alignment::Center
    } else {
        Alignment::Left
    }
}

/// All-caps lines centred, everything else left.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapsCentered;

impl AlignmentPolicy for CapsCentered {
    fn align(&mut self, line: &LineContext<'_>) -> Alignment {
        center_if(line.class == LineClass::AllCaps)
    }

    fn name(&self) -> &'static str {
        "caps"
    }
}

/// Centre a line when it and the line before it both ended early.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortRunCentered;

impl AlignmentPolicy for ShortRunCentered {
    fn align(&mut self, line: &LineContext<'_>) -> Alignment {
        center_if(line.in_short_run())
    }

    fn name(&self) -> &'static str {
        "short-run"
    }
}

/// [`ShortRunCentered`], and the document's first line is centred when it
/// ends early.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadShortRunCentered;

impl AlignmentPolicy for LeadShortRunCentered {
    fn align(&mut self, line: &LineContext<'_>) -> Alignment {
        center_if(line.in_short_run() || (line.is_first && !line.forced))
    }

    fn name(&self) -> &'static str {
        "lead-short-run"
    }
}

/// Never centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftOnly;

impl AlignmentPolicy for LeftOnly {
    fn align(&mut self, _line: &LineContext<'_>) -> Alignment {
        Alignment::Left
    }

    fn name(&self) -> &'static str {
        "left"
    }
}

/// Keeps numbered and bulleted lines flush left, otherwise defers to `P`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListMarkersLeft<P> {
    inner: P,
}

impl<P: AlignmentPolicy> ListMarkersLeft<P> {
    /// Wrap a policy.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// The wrapped policy.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: AlignmentPolicy> AlignmentPolicy for ListMarkersLeft<P> {
    fn align(&mut self, line: &LineContext<'_>) -> Alignment {
        let aligned = self.inner.align(line);
        if line.starts_with_list_marker() {
            Alignment::Left
        } else {
            aligned
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Built-in policies by CLI name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// [`CapsCentered`]
    #[default]
    Caps,
    /// [`ShortRunCentered`]
    ShortRun,
    /// [`LeadShortRunCentered`]
    LeadShortRun,
    /// [`LeftOnly`]
    Left,
}

impl AlignMode {
    /// Boxed policy for this mode, optionally keeping list markers left.
    pub fn policy(self, keep_list_markers_left: bool) -> Box<dyn AlignmentPolicy> {
        match (self, keep_list_markers_left) {
            (AlignMode::Caps, false) => Box::new(CapsCentered),
            (AlignMode::Caps, true) => Box::new(ListMarkersLeft::new(CapsCentered)),
            (AlignMode::ShortRun, false) => Box::new(ShortRunCentered),
            (AlignMode::ShortRun, true) => Box::new(ListMarkersLeft::new(ShortRunCentered)),
            (AlignMode::LeadShortRun, false) => Box::new(LeadShortRunCentered),
            (AlignMode::LeadShortRun, true) => {
                Box::new(ListMarkersLeft::new(LeadShortRunCentered))
            }
            (AlignMode::Left, _) => Box::new(LeftOnly),
        }
    }
}

impl std::str::FromStr for AlignMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "caps" => Ok(AlignMode::Caps),
            "short-run" => Ok(AlignMode::ShortRun),
            "lead-short-run" => Ok(AlignMode::LeadShortRun),
            "left" => Ok(AlignMode::Left),
            other => Err(format!("unknown alignment mode '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(text: &str, forced: bool, prev_forced: Option<bool>) -> LineContext<'_> {
        LineContext {
            text,
            class: LineClass::of(text),
            forced,
            prev_forced,
            is_first: prev_forced.is_none(),
        }
    }

    #[test]
    fn test_line_class() {
        assert_eq!(LineClass::of("   "), LineClass::Blank);
        assert_eq!(LineClass::of("COMES NOW PLAINTIFF"), LineClass::AllCaps);
        assert_eq!(LineClass::of("Comes now"), LineClass::Text);
    }

    #[test]
    fn test_caps_centered() {
        let mut p = CapsCentered;
        assert_eq!(p.align(&ctx("COMPLAINT", false, None)), Alignment::Center);
        assert_eq!(p.align(&ctx("Complaint", false, None)), Alignment::Left);
    }

    #[test]
    fn test_short_run() {
        let mut p = ShortRunCentered;
        assert_eq!(p.align(&ctx("first", false, None)), Alignment::Left);
        assert_eq!(p.align(&ctx("short", false, Some(false))), Alignment::Center);
        assert_eq!(p.align(&ctx("short", false, Some(true))), Alignment::Left);
        assert_eq!(p.align(&ctx("full", true, Some(false))), Alignment::Left);
    }

    #[test]
    fn test_lead_short_run() {
        let mut p = LeadShortRunCentered;
        assert_eq!(p.align(&ctx("first", false, None)), Alignment::Center);
        assert_eq!(p.align(&ctx("first", true, None)), Alignment::Left);
    }

    #[test]
    fn test_list_markers_left() {
        let mut p = ListMarkersLeft::new(CapsCentered);
        assert_eq!(p.align(&ctx("1. FIRST CLAIM", false, None)), Alignment::Left);
        assert_eq!(p.align(&ctx("• ITEM", false, None)), Alignment::Left);
        assert_eq!(p.align(&ctx("PRAYER", false, None)), Alignment::Center);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("short-run".parse::<AlignMode>().unwrap(), AlignMode::ShortRun);
        assert!("diagonal".parse::<AlignMode>().is_err());
        assert_eq!(AlignMode::Caps.policy(true).name(), "caps");
    }
}
