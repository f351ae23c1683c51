//! Display formatting helpers for scores and vote tallies.
//!
//! For address formatting use [`shared::utils::format_address`] or
//! [`shared::utils::truncate_address`].

use shared::dto::dao::VoteTally;

/// Format a trust score for display, e.g. `72.4` -> `"72.4 / 100"`.
pub fn format_score(score: f64) -> String {
    format!("{:.1} / 100", score)
}

/// Format a vote tally, e.g. `"10 yes / 2 no (quorum 10)"`.
pub fn format_tally(votes: &VoteTally) -> String {
    format!("{} yes / {} no (quorum {})", votes.yes, votes.no, votes.quorum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_shown_to_one_decimal() {
        assert_eq!(format_score(72.44), "72.4 / 100");
        assert_eq!(format_score(100.0), "100.0 / 100");
    }

    #[test]
    fn tally_names_all_three_numbers() {
        let tally = VoteTally { yes: 10, no: 2, quorum: 10 };
        assert_eq!(format_tally(&tally), "10 yes / 2 no (quorum 10)");
    }
}
