// Search observers
//
// The search reports every dropped path to an observer. Reports are built
// lazily, so the default `NoopObserver` costs nothing.

use std::fmt;

/// Why a path or a transition was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The transition's condition did not accept the path.
    Condition(String),
    /// The rendered surface is not a prefix of the remaining input.
    SurfaceMismatch { surface: String },
    /// The template could not be rendered with the path's attributes.
    Unrenderable,
    /// Input or requested morphemes are exhausted; only epsilon moves remain.
    NoTailForSurface,
    /// The transition's morpheme is not the next requested one.
    MorphemeMismatch { expected: &'static str },
    /// Nothing left to consume but the path cannot end here.
    CannotTerminate,
    /// The path visited one state too many times.
    Cyclic { visits: usize },
    /// A surface-less derivation that generation was not asked for.
    UnrequestedDerivation,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Condition(c) => write!(f, "condition {c} failed"),
            RejectReason::SurfaceMismatch { surface } => write!(f, "surface {surface:?} does not match input"),
            RejectReason::Unrenderable => f.write_str("template cannot be rendered"),
            RejectReason::NoTailForSurface => f.write_str("nothing left for a surface transition"),
            RejectReason::MorphemeMismatch { expected } => write!(f, "expected morpheme {expected}"),
            RejectReason::CannotTerminate => f.write_str("path cannot terminate here"),
            RejectReason::Cyclic { visits } => write!(f, "state visited {visits} times"),
            RejectReason::UnrequestedDerivation => f.write_str("derivation was not requested"),
        }
    }
}

/// One rejection record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The path as `surface:Morpheme+...`.
    pub path: String,
    /// The transition, `from -[template]-> to`, if one was involved.
    pub transition: Option<String>,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(t) = &self.transition {
            write!(f, " {t}")?;
        }
        write!(f, ": {}", self.reason)
    }
}

/// Receives reports from a running search. Must not influence results.
pub trait SearchObserver {
    /// Called for every dropped path or transition.
    fn reject(&mut self, make: impl FnOnce() -> Rejection);

    /// Called for every accepted path, formatted like a rejection path.
    fn accept(&mut self, _path: impl FnOnce() -> String) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    #[inline]
    fn reject(&mut self, _make: impl FnOnce() -> Rejection) {}
}

/// Observer that records every report, for diagnostic tooling.
#[derive(Debug, Clone, Default)]
pub struct DebugRecorder {
    pub rejections: Vec<Rejection>,
    pub accepted: Vec<String>,
}

impl DebugRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rejections.clear();
        self.accepted.clear();
    }
}

impl SearchObserver for DebugRecorder {
    fn reject(&mut self, make: impl FnOnce() -> Rejection) {
        self.rejections.push(make());
    }

    fn accept(&mut self, path: impl FnOnce() -> String) {
        self.accepted.push(path());
    }
}

impl fmt::Display for DebugRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in &self.accepted {
            writeln!(f, "accepted {a}")?;
        }
        for r in &self.rejections {
            writeln!(f, "rejected {r}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_never_builds_reports() {
        let mut o = NoopObserver;
        o.reject(|| panic!("must not be called"));
        o.accept(|| panic!("must not be called"));
    }

    #[test]
    fn recorder_formats_reports() {
        let mut r = DebugRecorder::new();
        r.reject(|| Rejection {
            path: "elma:Noun".into(),
            transition: Some("noun_S -[lAr]-> a3pl_S".into()),
            reason: RejectReason::SurfaceMismatch {
                surface: "lar".into(),
            },
        });
        r.accept(|| "elma:Noun+A3sg".into());
        assert_eq!(r.rejections.len(), 1);
        assert_eq!(
            r.to_string(),
            "accepted elma:Noun+A3sg\nrejected elma:Noun noun_S -[lAr]-> a3pl_S: surface \"lar\" does not match input\n"
        );
        r.clear();
        assert!(r.rejections.is_empty());
    }
}
