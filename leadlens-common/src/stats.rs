//! Statistical aggregation over usable evaluations
//!
//! Single pass, no error conditions: empty input yields zeroed global
//! stats and an empty ranking. Inputs are expected to already be
//! filtered to usable scores, canonicalized, and scope-filtered.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

/// One evaluation ready for aggregation: usable score, canonical
/// seller name, optional strictly-positive duration.
#[derive(Debug, Clone)]
pub struct ScoredEvaluation {
    pub sellers_id: i64,
    pub seller_name: String,
    pub score: i64,
    pub duration_secs: Option<i64>,
}

/// Statistics over a whole evaluation set.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct GlobalStats {
    pub total_leads: i64,
    pub avg_score: f64,
    /// Average duration in seconds over evaluations with a positive
    /// duration; 0 when none have one.
    pub avg_response_time: f64,
}

/// Per-seller aggregate, keyed by canonical name.
#[derive(Debug, Clone, Serialize)]
pub struct SellerStats {
    /// Smallest underlying id seen for this canonical name. Ids are not
    /// unique across sources, so grouping is by name and the displayed
    /// id is a deterministic pick.
    pub sellers_id: i64,
    pub seller_name: String,
    pub total_leads: i64,
    pub avg_score: f64,
    pub avg_response_time: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    sellers_id: i64,
    seller_name: String,
    score_sum: i64,
    score_count: i64,
    duration_sum: i64,
    duration_count: i64,
}

impl Accumulator {
    fn avg_score(&self) -> f64 {
        if self.score_count == 0 {
            0.0
        } else {
            self.score_sum as f64 / self.score_count as f64
        }
    }

    fn avg_response_time(&self) -> f64 {
        if self.duration_count == 0 {
            0.0
        } else {
            self.duration_sum as f64 / self.duration_count as f64
        }
    }

    fn add(&mut self, eval: &ScoredEvaluation) {
        self.score_sum += eval.score;
        self.score_count += 1;
        if let Some(secs) = eval.duration_secs {
            if secs > 0 {
                self.duration_sum += secs;
                self.duration_count += 1;
            }
        }
    }
}

/// Fold evaluations into global statistics plus a ranked seller list.
///
/// Ranking is descending by average score; ties keep encounter order
/// (stable sort, no secondary tie-break).
pub fn aggregate<I>(evaluations: I) -> (GlobalStats, Vec<SellerStats>)
where
    I: IntoIterator<Item = ScoredEvaluation>,
{
    let mut global = Accumulator::default();
    // Encounter-ordered accumulators with a name index, so the ranking
    // of equal averages stays stable.
    let mut sellers: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for eval in evaluations {
        global.add(&eval);

        let slot = *index.entry(eval.seller_name.clone()).or_insert_with(|| {
            sellers.push(Accumulator {
                sellers_id: eval.sellers_id,
                seller_name: eval.seller_name.clone(),
                ..Accumulator::default()
            });
            sellers.len() - 1
        });
        let acc = &mut sellers[slot];
        acc.sellers_id = acc.sellers_id.min(eval.sellers_id);
        acc.add(&eval);
    }

    let global_stats = GlobalStats {
        total_leads: global.score_count,
        avg_score: global.avg_score(),
        avg_response_time: global.avg_response_time(),
    };

    let mut ranking: Vec<SellerStats> = sellers
        .into_iter()
        .map(|acc| SellerStats {
            sellers_id: acc.sellers_id,
            seller_name: acc.seller_name.clone(),
            total_leads: acc.score_count,
            avg_score: acc.avg_score(),
            avg_response_time: acc.avg_response_time(),
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.avg_score
            .partial_cmp(&a.avg_score)
            .unwrap_or(Ordering::Equal)
    });

    (global_stats, ranking)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(id: i64, name: &str, score: i64, duration_secs: Option<i64>) -> ScoredEvaluation {
        ScoredEvaluation {
            sellers_id: id,
            seller_name: name.to_string(),
            score,
            duration_secs,
        }
    }

    #[test]
    fn empty_input_yields_zero_stats_and_empty_ranking() {
        let (global, ranking) = aggregate(Vec::new());
        assert_eq!(global, GlobalStats::default());
        assert!(ranking.is_empty());
    }

    #[test]
    fn averages_without_durations() {
        let (global, _) = aggregate(vec![
            eval(1, "Ana Sosa", 60, None),
            eval(1, "Ana Sosa", 90, None),
        ]);
        assert_eq!(global.total_leads, 2);
        assert_eq!(global.avg_score, 75.0);
        assert_eq!(global.avg_response_time, 0.0);
    }

    #[test]
    fn zero_duration_excluded_from_duration_count() {
        let (global, _) = aggregate(vec![
            eval(1, "Ana Sosa", 85, Some(0)),
            eval(1, "Ana Sosa", 70, Some(600)),
        ]);
        assert_eq!(global.total_leads, 2);
        // Only the 600s duration counts.
        assert_eq!(global.avg_response_time, 600.0);
    }

    #[test]
    fn ranking_descending_by_avg_score() {
        let (_, ranking) = aggregate(vec![
            eval(1, "Ana Sosa", 50, None),
            eval(2, "Luis Soto", 90, None),
            eval(1, "Ana Sosa", 70, None),
        ]);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].seller_name, "Luis Soto");
        assert_eq!(ranking[0].avg_score, 90.0);
        assert_eq!(ranking[1].seller_name, "Ana Sosa");
        assert_eq!(ranking[1].avg_score, 60.0);
    }

    #[test]
    fn tied_averages_keep_encounter_order() {
        let (_, ranking) = aggregate(vec![
            eval(2, "Luis Soto", 80, None),
            eval(1, "Ana Sosa", 80, None),
        ]);
        assert_eq!(ranking[0].seller_name, "Luis Soto");
        assert_eq!(ranking[1].seller_name, "Ana Sosa");
    }

    #[test]
    fn smallest_id_wins_for_shared_canonical_name() {
        // Same canonical name arriving from two sources with different
        // numeric ids.
        let (_, ranking) = aggregate(vec![
            eval(12, "María Calle", 80, None),
            eval(3, "María Calle", 90, None),
        ]);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].sellers_id, 3);
        assert_eq!(ranking[0].total_leads, 2);
    }

    #[test]
    fn per_seller_durations_scoped_to_seller() {
        let (_, ranking) = aggregate(vec![
            eval(1, "Ana Sosa", 80, Some(120)),
            eval(2, "Luis Soto", 70, None),
        ]);
        let ana = ranking.iter().find(|s| s.seller_name == "Ana Sosa").unwrap();
        let luis = ranking.iter().find(|s| s.seller_name == "Luis Soto").unwrap();
        assert_eq!(ana.avg_response_time, 120.0);
        assert_eq!(luis.avg_response_time, 0.0);
    }
}
