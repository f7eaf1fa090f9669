//! Derived-metric recomputation — the single source of truth for every
//! threshold the presentation layer needs: confidence bands, signal
//! strength tiers, and the score-breakdown bars. All functions here are
//! pure functions of the stored score/sub-scores, so repeated renders of
//! the same report are stable.

use serde::{Deserialize, Serialize};

/// How much of the claimed skill the score says is backed by observable
/// activity. A deterministic, monotonic function of the score — never set
/// independently of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthenticityLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for AuthenticityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthenticityLevel::High => write!(f, "High"),
            AuthenticityLevel::Medium => write!(f, "Medium"),
            AuthenticityLevel::Low => write!(f, "Low"),
        }
    }
}

impl std::str::FromStr for AuthenticityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(AuthenticityLevel::High),
            "Medium" => Ok(AuthenticityLevel::Medium),
            "Low" => Ok(AuthenticityLevel::Low),
            other => Err(format!("unknown authenticity level '{other}'")),
        }
    }
}

/// The one threshold table: `>75 → High`, `45..=75 → Medium`, `<45 → Low`.
/// UI confidence labels and the stored authenticity level both come from
/// here — reimplementing these thresholds anywhere else is a bug.
pub fn confidence_band(score: u32) -> AuthenticityLevel {
    if score > 75 {
        AuthenticityLevel::High
    } else if score >= 45 {
        AuthenticityLevel::Medium
    } else {
        AuthenticityLevel::Low
    }
}

/// Three-way strength classification over a 0–100 sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStrength {
    Strong,
    Medium,
    Weak,
}

/// Standard tier: `>70 → Strong`, `40..=70 → Medium`, `<40 → Weak`.
pub fn strength_tier(sub_score: u32) -> SignalStrength {
    if sub_score > 70 {
        SignalStrength::Strong
    } else if sub_score >= 40 {
        SignalStrength::Medium
    } else {
        SignalStrength::Weak
    }
}

/// Ownership tier runs on slightly looser cut-points: `>65` / `>=35`.
pub fn ownership_tier(sub_score: u32) -> SignalStrength {
    if sub_score > 65 {
        SignalStrength::Strong
    } else if sub_score >= 35 {
        SignalStrength::Medium
    } else {
        SignalStrength::Weak
    }
}

/// Tech diversity is classified on the number of top repositories:
/// `>=4 → Strong`, `>=2 → Medium`.
pub fn diversity_tier(top_repo_count: usize) -> SignalStrength {
    if top_repo_count >= 4 {
        SignalStrength::Strong
    } else if top_repo_count >= 2 {
        SignalStrength::Medium
    } else {
        SignalStrength::Weak
    }
}

/// AI-risk tier is inverted — low risk is good: `<15 → Strong`,
/// `<40 → Medium`, else Weak.
pub fn ai_risk_tier(risk: u32) -> SignalStrength {
    if risk < 15 {
        SignalStrength::Strong
    } else if risk < 40 {
        SignalStrength::Medium
    } else {
        SignalStrength::Weak
    }
}

/// Presentation-time AI-risk sub-score on the usual 0–100 scale.
/// Inversely tied to the stored score (which is already net of the risk
/// adjustment); caps at 50 so risk alone never reads as catastrophic.
pub fn ai_risk_score(score: u32) -> u32 {
    (100u32.saturating_sub(score)) / 2
}

/// One evidence signal as shown in the signals panel.
#[derive(Debug, Clone, Serialize)]
pub struct EvidenceSignal {
    pub label: &'static str,
    pub strength: SignalStrength,
}

/// Inputs the evidence panel needs from a stored report.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceInputs {
    pub score: u32,
    pub contribution_consistency: u32,
    pub complexity: u32,
    pub collaboration: u32,
    pub top_repo_count: usize,
}

/// Recomputes the six evidence signals from a stored report's metrics.
pub fn evidence_signals(inputs: EvidenceInputs) -> Vec<EvidenceSignal> {
    vec![
        EvidenceSignal {
            label: "Commit consistency",
            strength: strength_tier(inputs.contribution_consistency),
        },
        EvidenceSignal {
            label: "Repo depth",
            strength: strength_tier(inputs.complexity),
        },
        EvidenceSignal {
            label: "Tech diversity",
            strength: diversity_tier(inputs.top_repo_count),
        },
        EvidenceSignal {
            label: "Contribution ownership",
            strength: ownership_tier(inputs.collaboration),
        },
        EvidenceSignal {
            label: "AI pattern risk",
            strength: ai_risk_tier(ai_risk_score(inputs.score)),
        },
        EvidenceSignal {
            label: "Project scale",
            strength: strength_tier(inputs.score),
        },
    ]
}

/// One bar of the score-breakdown visualization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownBar {
    pub label: &'static str,
    pub value: u32,
    pub max: u32,
}

/// The composite score decomposed back into category contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub bars: Vec<BreakdownBar>,
    /// Downward adjustment bar; the positive bars sum to
    /// `score + ai_risk_adjustment`, never less than the score.
    pub ai_risk_adjustment: u32,
}

const BREAKDOWN_WEIGHTS: [(&str, u32, u32); 4] = [
    ("GitHub Activity", 35, 40),
    ("Project Complexity", 30, 35),
    ("Consistency", 20, 25),
    ("Originality", 15, 20),
];

/// Decomposes a stored score into category bars. Pure function of the
/// score, so repeated renders are stable. The four positive bars sum
/// exactly to `score + ai_risk_adjustment`.
pub fn score_breakdown(score: u32) -> ScoreBreakdown {
    let ai_risk_adjustment = ai_risk_score(score) / 5; // 0..=10
    let gross = score + ai_risk_adjustment;

    // Largest-remainder apportionment of `gross` across the weights so the
    // bars always sum exactly to it.
    let mut values: Vec<u32> = BREAKDOWN_WEIGHTS
        .iter()
        .map(|(_, weight, _)| gross * weight / 100)
        .collect();
    let mut remainders: Vec<(usize, u32)> = BREAKDOWN_WEIGHTS
        .iter()
        .enumerate()
        .map(|(i, (_, weight, _))| (i, gross * weight % 100))
        .collect();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut shortfall = gross - values.iter().sum::<u32>();
    for (index, _) in remainders {
        if shortfall == 0 {
            break;
        }
        values[index] += 1;
        shortfall -= 1;
    }

    let bars = BREAKDOWN_WEIGHTS
        .iter()
        .zip(values)
        .map(|(&(label, _, max), value)| BreakdownBar { label, value, max })
        .collect();

    ScoreBreakdown {
        bars,
        ai_risk_adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_band_boundaries_are_exact() {
        assert_eq!(confidence_band(76), AuthenticityLevel::High);
        assert_eq!(confidence_band(75), AuthenticityLevel::Medium);
        assert_eq!(confidence_band(45), AuthenticityLevel::Medium);
        assert_eq!(confidence_band(44), AuthenticityLevel::Low);
        assert_eq!(confidence_band(0), AuthenticityLevel::Low);
        assert_eq!(confidence_band(100), AuthenticityLevel::High);
    }

    #[test]
    fn test_confidence_band_is_monotonic() {
        fn rank(level: AuthenticityLevel) -> u8 {
            match level {
                AuthenticityLevel::Low => 0,
                AuthenticityLevel::Medium => 1,
                AuthenticityLevel::High => 2,
            }
        }
        for score in 1..=100 {
            assert!(rank(confidence_band(score)) >= rank(confidence_band(score - 1)));
        }
    }

    #[test]
    fn test_strength_tier_boundaries_are_exact() {
        assert_eq!(strength_tier(71), SignalStrength::Strong);
        assert_eq!(strength_tier(70), SignalStrength::Medium);
        assert_eq!(strength_tier(40), SignalStrength::Medium);
        assert_eq!(strength_tier(39), SignalStrength::Weak);
    }

    #[test]
    fn test_ai_risk_tier_is_inverted() {
        assert_eq!(ai_risk_tier(14), SignalStrength::Strong);
        assert_eq!(ai_risk_tier(15), SignalStrength::Medium);
        assert_eq!(ai_risk_tier(39), SignalStrength::Medium);
        assert_eq!(ai_risk_tier(40), SignalStrength::Weak);
    }

    #[test]
    fn test_ownership_and_diversity_tiers() {
        assert_eq!(ownership_tier(66), SignalStrength::Strong);
        assert_eq!(ownership_tier(65), SignalStrength::Medium);
        assert_eq!(ownership_tier(34), SignalStrength::Weak);

        assert_eq!(diversity_tier(4), SignalStrength::Strong);
        assert_eq!(diversity_tier(2), SignalStrength::Medium);
        assert_eq!(diversity_tier(1), SignalStrength::Weak);
    }

    #[test]
    fn test_evidence_signals_cover_all_six_panels() {
        let signals = evidence_signals(EvidenceInputs {
            score: 80,
            contribution_consistency: 90,
            complexity: 50,
            collaboration: 20,
            top_repo_count: 5,
        });
        assert_eq!(signals.len(), 6);
        assert_eq!(signals[0].strength, SignalStrength::Strong);
        assert_eq!(signals[1].strength, SignalStrength::Medium);
        assert_eq!(signals[2].strength, SignalStrength::Strong);
        assert_eq!(signals[3].strength, SignalStrength::Weak);
        // score 80 → risk 10 → strong
        assert_eq!(signals[4].strength, SignalStrength::Strong);
    }

    #[test]
    fn test_breakdown_bars_sum_to_at_least_the_score() {
        for score in 0..=100 {
            let breakdown = score_breakdown(score);
            let positive: u32 = breakdown.bars.iter().map(|b| b.value).sum();
            assert_eq!(positive, score + breakdown.ai_risk_adjustment);
            assert!(positive >= score, "score {score}");
        }
    }

    #[test]
    fn test_breakdown_bars_stay_within_display_maxima() {
        for score in 0..=100 {
            for bar in score_breakdown(score).bars {
                assert!(bar.value <= bar.max, "score {score}, bar {}", bar.label);
            }
        }
    }

    #[test]
    fn test_breakdown_is_deterministic() {
        assert_eq!(score_breakdown(67), score_breakdown(67));
    }
}
