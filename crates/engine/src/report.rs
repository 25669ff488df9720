//! Per-collaborator totals.

use std::collections::HashMap;

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollaboratorTotal {
    pub collaborator: String,
    pub total: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// One entry per collaborator, in the order they first appear.
    pub totals: Vec<CollaboratorTotal>,
    pub grand_total: MoneyCents,
}

/// Sums `(collaborator, amount)` pairs per collaborator.
///
/// Amounts are parsed like user input. A single unparsable amount fails the
/// whole report with [`EngineError::MalformedAmount`]; no partial totals are
/// returned. A total that overflows fails it with
/// [`EngineError::AmountOverflow`].
pub fn aggregate_by_collaborator<I>(rows: I) -> ResultEngine<Report>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut totals: Vec<CollaboratorTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut grand_total = MoneyCents::ZERO;

    for (collaborator, amount_text) in rows {
        let amount = amount_text
            .parse::<MoneyCents>()
            .map_err(|_| EngineError::MalformedAmount {
                collaborator: collaborator.clone(),
                value: amount_text.clone(),
            })?;
        let overflow = || EngineError::AmountOverflow {
            collaborator: collaborator.clone(),
        };
        grand_total = grand_total.checked_add(amount).ok_or_else(overflow)?;

        match index.get(&collaborator) {
            Some(&position) => {
                let entry = &mut totals[position];
                entry.total = entry.total.checked_add(amount).ok_or_else(overflow)?;
            }
            None => {
                index.insert(collaborator.clone(), totals.len());
                totals.push(CollaboratorTotal {
                    collaborator,
                    total: amount,
                });
            }
        }
    }

    Ok(Report {
        totals,
        grand_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(c, a)| (c.to_string(), a.to_string()))
            .collect()
    }

    #[test]
    fn totals_follow_first_seen_order() {
        let report = aggregate_by_collaborator(pairs(&[
            ("ALICE", "100.00"),
            ("BOB", "50.00"),
            ("ALICE", "25.00"),
        ]))
        .unwrap();

        let rendered: Vec<(String, String)> = report
            .totals
            .iter()
            .map(|t| (t.collaborator.clone(), t.total.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("ALICE".to_string(), "125.00".to_string()),
                ("BOB".to_string(), "50.00".to_string()),
            ]
        );
        assert_eq!(report.grand_total, MoneyCents::new(17_500));
    }

    #[test]
    fn accepts_user_formatted_amounts() {
        let report =
            aggregate_by_collaborator(pairs(&[("CAROL", "R$ 1.000,50"), ("CAROL", "0,50")]))
                .unwrap();
        assert_eq!(report.totals[0].total, MoneyCents::new(100_100));
    }

    #[test]
    fn malformed_amount_aborts_report() {
        let err = aggregate_by_collaborator(pairs(&[("ALICE", "10.00"), ("BOB", "ten")]))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::MalformedAmount {
                collaborator: "BOB".to_string(),
                value: "ten".to_string(),
            }
        );
    }

    #[test]
    fn overflowing_total_is_not_a_malformed_amount() {
        let err = aggregate_by_collaborator(pairs(&[
            ("ALICE", "92233720368547758,07"),
            ("ALICE", "0,01"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::AmountOverflow {
                collaborator: "ALICE".to_string(),
            }
        );
    }

    #[test]
    fn empty_input_gives_empty_report() {
        assert_eq!(aggregate_by_collaborator(Vec::new()).unwrap(), Report::default());
    }
}
