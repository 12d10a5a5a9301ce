//! Tokenizer and parser for submitted lines.
//!
//! A token is a maximal run of non-space, non-quote characters and complete
//! double-quoted runs, so `"two words"x` is one token. A double quote with no
//! partner ends the current token and is dropped. Quote characters never
//! survive into a token and there is no escaping.

use std::collections::BTreeMap;

/// Value of a `-flag` or `-key=value` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// `-l`
    Flag,
    /// `-bg=black`
    Value(String),
}

/// Options parsed from a command line, keyed by name without leading dashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<String, OptionValue>);

impl Options {
    /// Set an option. A later option with the same name replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// The value of a `-key=value` option. Bare flags have no value.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(OptionValue::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Whether the option is present with a truthy value: a bare flag or a
    /// non-empty `key=value`.
    pub fn is_set(&self, name: &str) -> bool {
        match self.0.get(name) {
            Some(OptionValue::Flag) => true,
            Some(OptionValue::Value(v)) => !v.is_empty(),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A submitted line split into command, positional arguments and options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First token; `None` for blank input.
    pub command: Option<String>,
    pub args: Vec<String>,
    pub options: Options,
}

/// Split a line into tokens. Never fails; unbalanced quotes are tolerated.
pub fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Tracks whether a token is open, so `""` still yields an empty token.
    let mut in_token = false;
    let mut i = 0;

    let mut flush = |current: &mut String, in_token: &mut bool| {
        if *in_token {
            tokens.push(std::mem::take(current));
            *in_token = false;
        }
    };

    while i < chars.len() {
        let ch = chars[i];
        if ch == '"' {
            if let Some(len) = chars[i + 1..].iter().position(|&c| c == '"') {
                current.extend(&chars[i + 1..i + 1 + len]);
                in_token = true;
                i += len + 2;
            } else {
                flush(&mut current, &mut in_token);
                i += 1;
            }
            continue;
        }
        if ch.is_whitespace() {
            flush(&mut current, &mut in_token);
        } else {
            current.push(ch);
            in_token = true;
        }
        i += 1;
    }
    flush(&mut current, &mut in_token);

    tokens
        .into_iter()
        .map(|t| t.replace(['"', '\''], ""))
        .collect()
}

/// Parse a raw line into a [`ParsedCommand`].
///
/// Tokens after the command that start with `-` are options, split on the
/// first `=`; everything else is a positional argument.
pub fn parse(raw: &str) -> ParsedCommand {
    let mut tokens = tokenize(raw).into_iter();
    let command = tokens.next().filter(|c| !c.is_empty());

    let mut args = Vec::new();
    let mut options = Options::default();
    for token in tokens {
        if token.starts_with('-') {
            let body = token.trim_start_matches('-');
            match body.split_once('=') {
                Some((name, value)) => options.insert(name, OptionValue::Value(value.to_string())),
                None => options.insert(body, OptionValue::Flag),
            }
        } else {
            args.push(token);
        }
    }

    ParsedCommand {
        command,
        args,
        options,
    }
}
