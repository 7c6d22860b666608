use std::collections::HashSet;

use rusqlite::Connection;

use crate::error::Result;
use crate::store;

/// Case-insensitive substring containment, the only matching the rule
/// engine does.
pub fn contains_keyword(name: &str, keyword: &str) -> bool {
    name.to_uppercase().contains(&keyword.to_uppercase())
}

pub struct ClassifyResult {
    pub updated: usize,
    pub remaining: usize,
}

/// Run every rule, in insertion order, over the records that were still
/// Uncategorized when the pass started.
///
/// The snapshot is taken once: a record matching several rules is updated
/// by each of them in turn, so the last matching rule's labels stick.
/// Records classified before the pass (by an earlier run or a manual edit)
/// are never touched, which also makes repeat invocations no-ops once the
/// unclassified set is exhausted.
pub fn classify(conn: &Connection) -> Result<ClassifyResult> {
    let rules = store::load_rules(conn)?;
    let pending = store::unclassified(conn)?;

    let mut updated: HashSet<usize> = HashSet::new();
    for rule in &rules {
        let tx = conn.unchecked_transaction()?;
        for (i, (id, name)) in pending.iter().enumerate() {
            if contains_keyword(name, &rule.keyword) {
                store::set_classification(&tx, id, &rule.category, rule.bucket)?;
                updated.insert(i);
            }
        }
        tx.commit()?;
    }

    Ok(ClassifyResult {
        updated: updated.len(),
        remaining: pending.len() - updated.len(),
    })
}
