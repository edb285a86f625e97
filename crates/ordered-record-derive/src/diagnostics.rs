use std::{
    borrow::Cow,
    error::Error,
    fmt::{self, Display},
};

use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{ToTokens, quote_spanned};

#[derive(Debug)]
pub(crate) struct Diagnostics {
    diagnostics: Vec<DiagnosticsInner>,
}

#[derive(Debug)]
struct DiagnosticsInner {
    span: Span,
    message: Cow<'static, str>,
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Suggestion {
    Help(Cow<'static, str>),
    Note(Cow<'static, str>),
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help(help) => write!(f, "help = {help}"),
            Self::Note(note) => write!(f, "note = {note}"),
        }
    }
}

impl Diagnostics {
    fn message(&self) -> Cow<'static, str> {
        self.diagnostics
            .first()
            .map(|diagnostics| diagnostics.message.clone())
            .unwrap_or_else(|| Cow::Borrowed(""))
    }

    pub fn with_span<S: Into<Cow<'static, str>>>(span: Span, message: S) -> Self {
        Self {
            diagnostics: vec![DiagnosticsInner {
                span,
                message: message.into(),
                suggestions: Vec::new(),
            }],
        }
    }

    pub fn help<S: Into<Cow<'static, str>>>(mut self, help: S) -> Self {
        if let Some(diagnostics) = self.diagnostics.first_mut() {
            diagnostics.suggestions.push(Suggestion::Help(help.into()));
            diagnostics.suggestions.sort();
        }

        self
    }

    pub fn note<S: Into<Cow<'static, str>>>(mut self, note: S) -> Self {
        if let Some(diagnostics) = self.diagnostics.first_mut() {
            diagnostics.suggestions.push(Suggestion::Note(note.into()));
            diagnostics.suggestions.sort();
        }

        self
    }
}

impl Suggestion {
    const HELP_PREFIX: &'static str = "help: ";
    const NOTE_PREFIX: &'static str = "note: ";

    /// The suggestion as a standalone `syn::Error` message.
    fn to_error_message(&self) -> String {
        match self {
            Self::Help(help) => format!("{}{help}", Self::HELP_PREFIX),
            Self::Note(note) => format!("{}{note}", Self::NOTE_PREFIX),
        }
    }

    /// Inverse of [`Suggestion::to_error_message`].
    fn parse(message: &str) -> Option<Self> {
        if let Some(help) = message.strip_prefix(Self::HELP_PREFIX) {
            Some(Self::Help(Cow::Owned(help.to_owned())))
        } else {
            message
                .strip_prefix(Self::NOTE_PREFIX)
                .map(|note| Self::Note(Cow::Owned(note.to_owned())))
        }
    }
}

impl From<syn::Error> for Diagnostics {
    fn from(value: syn::Error) -> Self {
        let mut diagnostics = Vec::<DiagnosticsInner>::new();

        // Suggestions travel as trailing errors after the message they belong to
        for error in value {
            let message = error.to_string();
            match (diagnostics.last_mut(), Suggestion::parse(&message)) {
                (Some(last), Some(suggestion)) => {
                    last.suggestions.push(suggestion);
                    last.suggestions.sort();
                }
                _ => diagnostics.push(DiagnosticsInner {
                    span: error.span(),
                    message: message.into(),
                    suggestions: Vec::new(),
                }),
            }
        }

        Self { diagnostics }
    }
}

impl From<Diagnostics> for syn::Error {
    fn from(value: Diagnostics) -> Self {
        // Attribute parsers run inside syn callbacks, which only carry `syn::Error`
        let mut combined: Option<syn::Error> = None;
        for inner in value.diagnostics {
            let messages = std::iter::once(inner.message.into_owned())
                .chain(inner.suggestions.iter().map(Suggestion::to_error_message));
            for message in messages {
                let error = syn::Error::new(inner.span, message);
                match combined.as_mut() {
                    Some(combined) => combined.combine(error),
                    None => combined = Some(error),
                }
            }
        }

        combined.unwrap_or_else(|| syn::Error::new(Span::call_site(), "unknown error"))
    }
}

impl ToTokens for Diagnostics {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        for diagnostics in &self.diagnostics {
            let span = diagnostics.span;
            let message: &str = diagnostics.message.as_ref();

            let suggestions = diagnostics
                .suggestions
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("\n");

            let diagnostics = if !suggestions.is_empty() {
                Cow::Owned(format!("{message}\n\n{suggestions}"))
            } else {
                Cow::Borrowed(message)
            };

            tokens.extend(quote_spanned! {span=>
                ::core::compile_error!(#diagnostics);
            })
        }
    }
}

impl Error for Diagnostics {}
