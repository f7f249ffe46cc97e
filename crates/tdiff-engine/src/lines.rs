//! Line symbol table for line-mode diffing.
//!
//! Every distinct line (terminator included) is mapped to a single symbol so
//! that two long texts can be diffed as short symbol sequences.

use std::collections::HashMap;

use crate::op::Span;

/// Symbols available to the old text.
pub(crate) const MAX_OLD_LINES: usize = 40_000;
/// Symbols available to both texts together.
pub(crate) const MAX_NEW_LINES: usize = 65_535;

/// Bidirectional line <-> symbol mapping, built fresh per line-mode diff.
#[derive(Debug)]
pub(crate) struct LineSymbolTable {
    /// Line text by symbol. Symbol 0 is reserved and never assigned.
    lines: Vec<Vec<char>>,
    symbols: HashMap<Vec<char>, u32>,
}

impl LineSymbolTable {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            symbols: HashMap::new(),
        }
    }

    /// Number of symbols assigned so far, including the reserved one.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Encode `text` as one symbol per line.
    ///
    /// Once the table holds `max_lines` entries the remainder of the text is
    /// folded into one final oversized line.
    pub fn encode(&mut self, text: &[char], max_lines: usize) -> Vec<u32> {
        let mut symbols = Vec::new();
        let mut line_start = 0;
        while line_start < text.len() {
            let mut line_end = text[line_start..]
                .iter()
                .position(|&c| c == '\n')
                .map_or(text.len(), |i| line_start + i + 1);
            if self.lines.len() == max_lines {
                line_end = text.len();
            }
            symbols.push(self.intern(&text[line_start..line_end]));
            line_start = line_end;
        }
        symbols
    }

    fn intern(&mut self, line: &[char]) -> u32 {
        if let Some(&symbol) = self.symbols.get(line) {
            return symbol;
        }
        let symbol = self.lines.len() as u32;
        self.lines.push(line.to_vec());
        self.symbols.insert(line.to_vec(), symbol);
        symbol
    }

    /// Expand symbol spans back into the text of their lines.
    pub fn decode(&self, spans: Vec<Span<u32>>) -> Vec<Span<char>> {
        spans
            .into_iter()
            .map(|span| {
                let items = span
                    .items
                    .iter()
                    .flat_map(|&symbol| self.lines[symbol as usize].iter().copied())
                    .collect();
                Span::new(span.op, items)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Op;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn shared_lines_share_symbols() {
        let mut table = LineSymbolTable::new();
        let old = table.encode(&chars("alpha\nbeta\nalpha\n"), MAX_OLD_LINES);
        let new = table.encode(&chars("beta\nalpha\nbeta\n"), MAX_NEW_LINES);
        assert_eq!(old, vec![1, 2, 1]);
        assert_eq!(new, vec![2, 1, 2]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn last_line_without_terminator() {
        let mut table = LineSymbolTable::new();
        let old = table.encode(&chars("a\nb"), MAX_OLD_LINES);
        let new = table.encode(&chars("a\nb\n"), MAX_NEW_LINES);
        assert_eq!(old, vec![1, 2]);
        assert_eq!(new, vec![1, 3]);
    }

    #[test]
    fn empty_text_has_no_symbols() {
        let mut table = LineSymbolTable::new();
        assert!(table.encode(&[], MAX_OLD_LINES).is_empty());
    }

    #[test]
    fn decode_restores_text() {
        let mut table = LineSymbolTable::new();
        let old = table.encode(&chars("alpha\nbeta\nalpha\n"), MAX_OLD_LINES);
        let new = table.encode(&chars("beta\nalpha\nbeta\n"), MAX_NEW_LINES);
        let decoded = table.decode(vec![
            Span::new(Op::Equal, vec![old[0]]),
            Span::new(Op::Insert, new.clone()),
        ]);
        assert_eq!(decoded[0].items, chars("alpha\n"));
        assert_eq!(decoded[1].items, chars("beta\nalpha\nbeta\n"));
    }

    #[test]
    fn cap_folds_remainder_into_one_line() {
        let text: String = (1..=300).map(|i| format!("{i}\n")).collect();
        let mut table = LineSymbolTable::new();
        let symbols = table.encode(&chars(&text), 10);
        // Nine fresh symbols, then everything left as a single line.
        assert_eq!(symbols.len(), 10);
        assert_eq!(table.len(), 11);
        let tail = table.decode(vec![Span::new(Op::Equal, vec![symbols[9]])]);
        let expected: String = (10..=300).map(|i| format!("{i}\n")).collect();
        assert_eq!(tail[0].items, chars(&expected));
    }
}
