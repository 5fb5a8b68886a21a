//! Erro do pool: código do catálogo + contexto chave/valor.
//! O contexto é achatado numa linha e limitado a [`CONTEXT_VALUE_MAX`] chars,
//! então a mensagem de UI e a linha JSON de log nunca quebram.
use core::fmt::{self, Write as _};
use std::collections::BTreeMap;

use crate::amm::error_catalog::{default_locale_message, PoolErrorCode};

pub const CONTEXT_VALUE_MAX: usize = 256;

fn flatten(raw: &str) -> String {
    let flat = raw.chars().map(|c| if c.is_control() { ' ' } else { c });
    if raw.chars().count() <= CONTEXT_VALUE_MAX {
        return flat.collect();
    }
    flat.take(CONTEXT_VALUE_MAX - 1).chain(std::iter::once('…')).collect()
}

/// Troca `{chave}` pelo valor do contexto; chaves ausentes ficam literais.
fn fill_placeholders(template: &str, context: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &tail[..close];
        match context.get(key) {
            Some(value) => out.push_str(value),
            None => {
                let _ = write!(out, "{{{key}}}");
            }
        }
        rest = &tail[close + 1..];
    }
    out.push_str(rest);
    out
}

fn push_json_str(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Erro do pool com contexto estruturado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolError {
    pub code: PoolErrorCode,
    pub context: BTreeMap<String, String>,
}

impl PoolError {
    pub fn new(code: PoolErrorCode) -> Self {
        Self { code, context: BTreeMap::new() }
    }

    /// Adiciona `key = value` ao contexto; chave vazia é ignorada.
    pub fn with_context<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        let key = key.into();
        if !key.is_empty() {
            self.context.insert(key, flatten(&value.to_string()));
        }
        self
    }

    /// Mensagem do catálogo com os placeholders preenchidos.
    pub fn message(&self) -> String {
        fill_placeholders(default_locale_message(self.code), &self.context)
    }

    /// `[SWP-xxxx] mensagem`, para UI.
    pub fn to_user_string(&self) -> String {
        format!("[{}] {}", self.code.code(), self.message())
    }

    /// Uma linha JSON: `{"code","title","message","context":{..}}`.
    pub fn to_log_json(&self) -> String {
        let mut out = String::with_capacity(128);
        for (i, (field, value)) in [
            ("code", self.code.code().to_string()),
            ("title", self.code.title().to_string()),
            ("message", self.message()),
        ]
        .into_iter()
        .enumerate()
        {
            out.push(if i == 0 { '{' } else { ',' });
            push_json_str(&mut out, field);
            out.push(':');
            push_json_str(&mut out, &value);
        }
        out.push_str(",\"context\":{");
        for (i, (key, value)) in self.context.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_json_str(&mut out, key);
            out.push(':');
            push_json_str(&mut out, value);
        }
        out.push_str("}}");
        out
    }
}

impl From<PoolErrorCode> for PoolError {
    fn from(code: PoolErrorCode) -> Self {
        PoolError::new(code)
    }
}

impl PartialEq<PoolErrorCode> for PoolError {
    fn eq(&self, other: &PoolErrorCode) -> bool {
        self.code == *other
    }
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message())
    }
}

impl std::error::Error for PoolError {}

pub type Result<T> = std::result::Result<T, PoolError>;

#[macro_export]
macro_rules! pool_err {
  ($code:expr) => {{
    $crate::amm::error::PoolError::new($code)
  }};
  ($code:expr, $($key:ident => $value:expr),+ $(,)?) => {{
    let mut err = $crate::amm::error::PoolError::new($code);
    $(
      err = err.with_context(stringify!($key), $value);
    )+
    err
  }};
  ($code:expr, { $($key:expr => $value:expr),+ $(,)? }) => {{
    let mut err = $crate::amm::error::PoolError::new($code);
    $(
      err = err.with_context($key, $value);
    )+
    err
  }};
}

#[macro_export]
macro_rules! pool_bail {
  ($($tt:tt)*) => {
    return Err($crate::pool_err!($($tt)*))
  };
}
