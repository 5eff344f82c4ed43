use indexmap::IndexSet;

use crate::logic::assignment::Assignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        Self { var, sign }
    }

    pub fn neg(self) -> Self {
        Self {
            var: self.var,
            sign: !self.sign,
        }
    }
}

pub type Clause = Vec<Lit>;

/// Sorts and dedups `clause`; `None` if it holds both polarities of a variable.
pub fn normalize_clause(mut clause: Clause) -> Option<Clause> {
    clause.sort_unstable();
    clause.dedup();
    // sorted order puts (v, false) right before (v, true)
    if clause.windows(2).any(|w| w[0].var == w[1].var) {
        return None;
    }
    Some(clause)
}

pub fn merge_clauses(a: &[Lit], b: &[Lit]) -> Option<Clause> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    normalize_clause(out)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: IndexSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(idx) = self.names.get_index_of(name) {
            return idx as u32 + 1;
        }
        let (idx, _) = self.names.insert_full(name.to_owned());
        idx as u32 + 1
    }

    pub fn var(&self, name: &str) -> Option<u32> {
        self.names.get_index_of(name).map(|idx| idx as u32 + 1)
    }

    pub fn name(&self, var: u32) -> Option<&str> {
        if var == 0 {
            return None;
        }
        self.names.get_index(var as usize - 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (idx as u32 + 1, name.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    pub symbols: SymbolTable,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_vars(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// Largest variable id any clause mentions, at least `num_vars`.
    pub fn max_var(&self) -> u32 {
        self.clauses
            .iter()
            .flatten()
            .map(|lit| lit.var)
            .fold(self.num_vars(), u32::max)
    }

    pub fn add_clause(&mut self, clause: Clause) -> bool {
        match normalize_clause(clause) {
            Some(c) => {
                self.clauses.push(c);
                true
            }
            None => false,
        }
    }

    pub fn add_named_clause(&mut self, lits: &[(&str, bool)]) -> bool {
        let clause = lits
            .iter()
            .map(|&(name, sign)| Lit::new(self.symbols.intern(name), sign))
            .collect::<Vec<_>>();
        self.add_clause(clause)
    }

    pub fn lit_name(&self, lit: Lit) -> String {
        let name = self.symbols.name(lit.var).unwrap_or("?");
        if lit.sign {
            name.to_owned()
        } else {
            format!("~{name}")
        }
    }

    pub fn eval_lit_partial(lit: Lit, assignment: &[Option<bool>]) -> Option<bool> {
        let var = lit.var as usize;
        if var >= assignment.len() {
            return None;
        }
        assignment[var].map(|v| if lit.sign { v } else { !v })
    }

    pub fn eval_clause_partial(clause: &[Lit], assignment: &[Option<bool>]) -> Option<bool> {
        let mut any_unknown = false;
        for &lit in clause {
            match Self::eval_lit_partial(lit, assignment) {
                Some(true) => return Some(true),
                Some(false) => {}
                None => any_unknown = true,
            }
        }
        if any_unknown { None } else { Some(false) }
    }

    pub fn eval_formula_partial(&self, assignment: &[Option<bool>]) -> Option<bool> {
        let mut all_true = true;
        for clause in &self.clauses {
            match Self::eval_clause_partial(clause, assignment) {
                Some(true) => {}
                Some(false) => return Some(false),
                None => all_true = false,
            }
        }
        if all_true { Some(true) } else { None }
    }

    pub fn eval_assignment(&self, model: &Assignment) -> Option<bool> {
        let mut values = vec![None; self.max_var() as usize + 1];
        for (var, name) in self.symbols.iter() {
            values[var as usize] = model.get(name);
        }
        self.eval_formula_partial(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cnf, Lit, SymbolTable, merge_clauses, normalize_clause};
    use crate::logic::assignment::Assignment;

    #[test]
    fn normalize_sorts_and_spots_tautologies() {
        let c = normalize_clause(vec![Lit::new(3, true), Lit::new(1, false), Lit::new(3, true)]);
        assert_eq!(c, Some(vec![Lit::new(1, false), Lit::new(3, true)]));
        assert_eq!(
            normalize_clause(vec![Lit::new(2, true), Lit::new(2, false)]),
            None
        );
        assert_eq!(
            merge_clauses(&[Lit::new(1, true)], &[Lit::new(1, false), Lit::new(2, true)]),
            None
        );
    }

    #[test]
    fn symbol_table_is_one_based_and_stable() {
        let mut t = SymbolTable::new();
        assert_eq!(t.intern("b"), 1);
        assert_eq!(t.intern("a"), 2);
        assert_eq!(t.intern("b"), 1);
        assert_eq!(t.name(2), Some("a"));
        assert_eq!(t.name(0), None);
        assert_eq!(t.var("zz"), None);
    }

    #[test]
    fn eval_against_named_assignment() {
        let mut cnf = Cnf::new();
        cnf.add_named_clause(&[("a", true), ("b", false)]);
        cnf.add_named_clause(&[("b", true)]);
        assert!(!cnf.add_named_clause(&[("a", true), ("a", false)]));
        assert_eq!(cnf.clauses.len(), 2);

        let mut model = Assignment::new();
        model.insert("a", true);
        assert_eq!(cnf.eval_assignment(&model), None);
        model.insert("b", true);
        assert_eq!(cnf.eval_assignment(&model), Some(true));
        model.insert("a", false);
        assert_eq!(cnf.eval_assignment(&model), Some(false));
    }
}
