//! Vendor macros for code and diagram blocks.
//!
//! A macro is an `ac:structured-macro` element wrapping a literal
//! `<ac:plain-text-body>` CDATA section. Macro names differ between
//! installations (the mermaid plugin in particular), so they are configurable.

use super::markup;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static LANGUAGE_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"ac:parameter[^>]*ac:name="language"[^>]*>([^<]+)<"#)
        .expect("valid language parameter regex")
});

static DEFAULT_PATTERNS: Lazy<MacroPatterns> = Lazy::new(|| MacroPatterns::new(&MacroNames::default()));

/// Names of the macros emitted for fenced blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroNames {
    pub mermaid: String,
    pub plantuml: String,
    pub code: String,
}

impl Default for MacroNames {
    fn default() -> Self {
        Self {
            mermaid: "mermaid-macro".to_string(),
            plantuml: "plantuml".to_string(),
            code: "code".to_string(),
        }
    }
}

/// What a fenced block turns into, decided by its info string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind<'a> {
    Mermaid,
    PlantUml,
    Code { language: &'a str },
}

impl<'a> BlockKind<'a> {
    pub fn from_language(language: &'a str) -> Self {
        match language {
            "mermaid" => BlockKind::Mermaid,
            "plantuml" | "uml" | "puml" => BlockKind::PlantUml,
            _ => BlockKind::Code { language },
        }
    }
}

impl MacroNames {
    /// Render a fenced block body as a macro. The body is never escaped.
    pub fn render(&self, kind: BlockKind<'_>, body: &str) -> String {
        let (name, parameter) = match kind {
            BlockKind::Mermaid => (self.mermaid.as_str(), String::new()),
            BlockKind::PlantUml => (self.plantuml.as_str(), String::new()),
            BlockKind::Code { language } if language.is_empty() => {
                (self.code.as_str(), String::new())
            }
            BlockKind::Code { language } => (
                self.code.as_str(),
                format!(r#"<ac:parameter ac:name="language">{language}</ac:parameter>"#),
            ),
        };
        format!(
            r#"<ac:structured-macro ac:name="{name}">{parameter}<ac:plain-text-body>{}</ac:plain-text-body></ac:structured-macro>"#,
            markup::cdata(body)
        )
    }
}

/// Compiled matchers that turn macros back into fenced blocks.
#[derive(Debug, Clone)]
pub struct MacroPatterns {
    mermaid: Regex,
    plantuml: Regex,
    code: Regex,
}

impl MacroPatterns {
    pub fn new(names: &MacroNames) -> Self {
        Self {
            mermaid: Self::compile(&names.mermaid),
            plantuml: Self::compile(&names.plantuml),
            code: Self::compile(&names.code),
        }
    }

    /// Shared patterns for the default macro names.
    pub fn defaults() -> &'static MacroPatterns {
        &DEFAULT_PATTERNS
    }

    fn compile(name: &str) -> Regex {
        let pattern = format!(
            r#"(?s)<ac:structured-macro[^>]*ac:name="{}"[^>]*>.*?<ac:plain-text-body><!\[CDATA\[(.*?)\]\]></ac:plain-text-body></ac:structured-macro>"#,
            regex::escape(name)
        );
        Regex::new(&pattern).expect("escaped macro name yields a valid regex")
    }

    /// Known macros → fenced blocks. Diagrams are tagged `mermaid` /
    /// `plantuml`, code blocks with their `language` parameter.
    ///
    /// `emit` receives each rendered fence and returns the text that takes
    /// its place, followed by a newline.
    pub fn to_fences<F>(&self, markup: &str, mut emit: F) -> String
    where
        F: FnMut(String) -> String,
    {
        let text = self.mermaid.replace_all(markup, |caps: &Captures| {
            emit(fence("mermaid", &markup::join_cdata(&caps[1]))) + "\n"
        });
        let text = self.plantuml.replace_all(&text, |caps: &Captures| {
            emit(fence("plantuml", &markup::join_cdata(&caps[1]))) + "\n"
        });
        self.code
            .replace_all(&text, |caps: &Captures| {
                let language = LANGUAGE_PARAM
                    .captures(&caps[0])
                    .map(|lang| lang[1].to_string())
                    .unwrap_or_default();
                emit(fence(&language, &markup::join_cdata(&caps[1]))) + "\n"
            })
            .into_owned()
    }
}

fn fence(language: &str, body: &str) -> String {
    format!("```{language}\n{body}\n```")
}
