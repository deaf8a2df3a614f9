//! Template audit: the diagnostics surface.
//!
//! A dry run over a template with no arguments and no sink. Every
//! directive is parsed, legality-checked, and normalised; the errors and
//! the warnings the normaliser would apply silently come back with byte
//! offsets. The public entry points never expose warnings — this helper
//! and the tests are their only consumers.
//!
//! Call-level properties that need the whole template and the argument
//! list (mode consistency, position gaps, slot conflicts) are the
//! driver's to enforce; the audit stops at per-directive diagnostics.

use memchr::memchr;

use stampa_spec::{check_length_conv, normalize, parse_directive, ParseError, Warning};

/// One audit finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuditNote {
    /// Byte offset of the directive's `%`.
    pub at: usize,
    /// What was found there.
    pub kind: AuditKind,
}

/// Finding classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditKind {
    /// Would abort a real call.
    Error(ParseError),
    /// Would be normalised away silently.
    Warning(Warning),
}

/// Dry-run the parser and validator over `template`.
///
/// Unlike a real call, a bad directive does not stop the sweep: scanning
/// resumes at the next `%`, so one audit reports every finding.
pub fn audit(template: &[u8]) -> Vec<AuditNote> {
    let mut notes = Vec::new();
    let mut pos = 0usize;

    while let Some(offset) = memchr(b'%', &template[pos..]) {
        let at = pos + offset;
        if template.get(at + 1) == Some(&b'%') {
            pos = at + 2;
            continue;
        }
        match parse_directive(template, at) {
            Err(err) => {
                notes.push(AuditNote {
                    at,
                    kind: AuditKind::Error(err),
                });
                pos = at + 1;
            }
            Ok(parsed) => {
                let mut spec = parsed.spec;
                if let Some(warning) = parsed.warning {
                    notes.push(AuditNote {
                        at,
                        kind: AuditKind::Warning(warning),
                    });
                }
                if let Err(err) = check_length_conv(&spec) {
                    notes.push(AuditNote {
                        at,
                        kind: AuditKind::Error(err),
                    });
                } else if let Some(warning) = normalize(&mut spec) {
                    notes.push(AuditNote {
                        at,
                        kind: AuditKind::Warning(warning),
                    });
                }
                pos = at + spec.len as usize;
            }
        }
    }
    notes
}
