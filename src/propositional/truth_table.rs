//! Entailment by truth-table enumeration.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::formula::{EvalError, Model, Prop};

/// Largest symbol count enumerated; the table has 2^n rows.
pub const MAX_SYMBOLS: usize = 20;

/// One model of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    pub values: Vec<bool>,
    pub kb: bool,
    pub query: bool,
    /// `kb ⇒ query` under this model.
    pub implication: bool,
}

/// A full truth table for `KB ⊨ query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    pub kb: String,
    pub query: String,
    pub symbols: Vec<String>,
    pub rows: Vec<TruthRow>,
    pub entails: bool,
}

impl TruthTable {
    /// Rows where the knowledge base holds but the query does not.
    pub fn counterexamples(&self) -> impl Iterator<Item = &TruthRow> {
        self.rows.iter().filter(|r| r.kb && !r.query)
    }
}

/// Sorted symbols of a formula, for callers with no explicit symbol list.
pub fn symbols_of(prop: &Prop) -> Vec<String> {
    prop.symbols().into_iter().map(str::to_string).collect()
}

/// Check `kb ⊨ query` over every assignment of `symbols`.
///
/// Models run from all-true to all-false, the first symbol varying
/// slowest. Entailment fails iff some model makes `kb` true and `query`
/// false.
pub fn tt_entails<S: AsRef<str>>(
    kb: &Prop,
    query: &Prop,
    symbols: &[S],
) -> Result<TruthTable, EvalError> {
    let n = symbols.len();
    if n > MAX_SYMBOLS {
        return Err(EvalError::TooManySymbols(n));
    }
    for (i, symbol) in symbols.iter().enumerate() {
        let symbol = symbol.as_ref();
        if symbols[..i].iter().any(|s| s.as_ref() == symbol) {
            return Err(EvalError::DuplicateSymbol(symbol.to_string()));
        }
    }

    let mut rows = Vec::with_capacity(1 << n);
    for index in 0..(1usize << n) {
        let values: Vec<bool> = (0..n).map(|j| (index >> (n - 1 - j)) & 1 == 0).collect();
        let model: Model = symbols
            .iter()
            .map(|s| s.as_ref().to_string())
            .zip(values.iter().copied())
            .collect();
        let kb_val = kb.eval(&model)?;
        let query_val = query.eval(&model)?;
        rows.push(TruthRow {
            values,
            kb: kb_val,
            query: query_val,
            implication: !kb_val || query_val,
        });
    }

    let entails = rows.iter().all(|r| r.implication);
    debug!(%kb, %query, rows = rows.len(), entails, "truth table evaluated");

    Ok(TruthTable {
        kb: kb.to_string(),
        query: query.to_string(),
        symbols: symbols.iter().map(|s| s.as_ref().to_string()).collect(),
        rows,
        entails,
    })
}

fn tf(b: bool) -> &'static str {
    if b {
        "T"
    } else {
        "F"
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = self.symbols.join(" | ");
        if !header.is_empty() {
            header.push_str(" | ");
        }
        header.push_str("KB | Query | KB ⇒ Query");
        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "-".repeat(header.chars().count()))?;

        for row in &self.rows {
            for value in &row.values {
                write!(f, "{} | ", tf(*value))?;
            }
            writeln!(
                f,
                "{}  | {}     | {}",
                tf(row.kb),
                tf(row.query),
                tf(row.implication)
            )?;
        }

        writeln!(f)?;
        if self.entails {
            write!(f, "The knowledge base entails the query (KB ⊨ {})", self.query)
        } else {
            write!(f, "The knowledge base does NOT entail the query (KB ⊭ {})", self.query)
        }
    }
}
