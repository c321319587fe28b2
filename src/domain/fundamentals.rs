//! Tabular company fundamentals: statements, holders, analyst recommendations.

use std::fmt;

/// The fundamentals tables a provider may publish for a stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Fundamentals {
    Recommendations,
    Financials,
    BalanceSheet,
    Cashflow,
    Earnings,
    Calendar,
    MajorHolders,
    InstitutionalHolders,
    MutualFundHolders,
}

impl Fundamentals {
    pub const ALL: [Fundamentals; 9] = [
        Fundamentals::Recommendations,
        Fundamentals::Financials,
        Fundamentals::BalanceSheet,
        Fundamentals::Cashflow,
        Fundamentals::Earnings,
        Fundamentals::Calendar,
        Fundamentals::MajorHolders,
        Fundamentals::InstitutionalHolders,
        Fundamentals::MutualFundHolders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fundamentals::Recommendations => "recommendations",
            Fundamentals::Financials => "financials",
            Fundamentals::BalanceSheet => "balance_sheet",
            Fundamentals::Cashflow => "cashflow",
            Fundamentals::Earnings => "earnings",
            Fundamentals::Calendar => "calendar",
            Fundamentals::MajorHolders => "major_holders",
            Fundamentals::InstitutionalHolders => "institutional_holders",
            Fundamentals::MutualFundHolders => "mutualfund_holders",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for Fundamentals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A header row plus string cells. Cells are kept as the provider reported
/// them; statements mix numbers, dates and free text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding short rows with empty cells and truncating long ones.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.columns.len())
            .map(Into::into)
            .collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                self.rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain([c.chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };
        write!(f, "{}", line(&self.columns))?;
        for row in &self.rows {
            write!(f, "\n{}", line(row))?;
        }
        Ok(())
    }
}
