#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::trail::{Reason, Trail};
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Conflict<L: Literal> {
    /// Conflict at decision level 0: the formula is unsatisfiable.
    #[default]
    Ground,
    /// A learnt clause with its asserting literal at position 0 and, if it
    /// has more than one literal, the literal from the backjump level at
    /// position 1.
    Learned { clause: Clause<L>, backjump: usize },
}

/// First-UIP analysis.
///
/// Resolves the conflicting clause with the reasons of current-level
/// literals, walking the trail backwards, until a single current-level
/// literal is left. Level-0 literals are dropped. Returns the conflict together with every variable that took part
/// in the resolution, for activity bumping.
#[must_use]
pub fn analyse_conflict<L: Literal>(
    cnf: &Cnf<L>,
    trail: &Trail<L>,
    c_ref: usize,
) -> (Conflict<L>, Vec<Variable>) {
    let dl = trail.decision_level();
    if dl == 0 {
        return (Conflict::Ground, Vec::new());
    }

    let mut seen = vec![false; cnf.num_vars.max(1)];
    let mut to_bump = Vec::new();
    let mut learnt: SmallVec<[L; 8]> = SmallVec::new();
    learnt.push(L::default());

    let mut path_c = 0_usize;
    let mut i = trail.len();
    let mut reason = c_ref;
    let mut pivot: Option<L> = None;

    loop {
        let skip = usize::from(pivot.is_some());
        for &lit in cnf[reason].iter().skip(skip) {
            let var = lit.variable();
            let level = trail.level(var);
            if seen[var as usize] || level == 0 {
                continue;
            }
            seen[var as usize] = true;
            to_bump.push(var);
            if level >= dl {
                path_c += 1;
            } else {
                learnt.push(lit);
            }
        }

        loop {
            i -= 1;
            if seen[trail[i].lit.variable() as usize] {
                break;
            }
        }

        let step = &trail[i];
        seen[step.lit.variable() as usize] = false;
        pivot = Some(step.lit);
        path_c -= 1;

        if path_c == 0 {
            break;
        }

        match step.reason {
            Reason::Clause(idx) => reason = idx,
            // only the decision of a level has no reason and it is always the
            // last current-level literal reached
            Reason::Decision | Reason::Unit => break,
        }
    }

    if let Some(uip) = pivot {
        learnt[0] = uip.negated();
    }

    let mut backjump = 0;
    if learnt.len() > 1 {
        let (max_idx, max_level) = learnt
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, l)| (k, trail.level(l.variable())))
            .max_by_key(|&(_, level)| level)
            .unwrap_or((1, 0));
        learnt.swap(1, max_idx);
        backjump = max_level;
    }

    let clause = Clause {
        literals: learnt,
        learnt: true,
    };

    (Conflict::Learned { clause, backjump }, to_bump)
}
