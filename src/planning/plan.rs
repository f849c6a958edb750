//! Time-boxed study plans.
//!
//! Every method has a fixed template whose shares of the session budget sum to
//! at most one, so truncated minutes can only undershoot the budget.

use std::fmt;

use serde::Serialize;

use crate::data::domain::{StudyMethod, TimeAvailable};

/// Budget used when the time tier is not recognised.
pub const DEFAULT_BUDGET_MINUTES: u32 = 120;

/// Session budget in minutes for a raw time tier.
pub fn budget_minutes(time_available: &str) -> u32 {
    match TimeAvailable::parse(time_available) {
        Some(TimeAvailable::Short) => 90,
        Some(TimeAvailable::Medium) => 210,
        Some(TimeAvailable::Long) => 300,
        None => DEFAULT_BUDGET_MINUTES,
    }
}

/// A named slice of the budget, as a fraction `num / den`.
#[derive(Copy, Clone, Debug)]
struct Share {
    name: &'static str,
    num: u32,
    den: u32,
}

const fn share(name: &'static str, num: u32, den: u32) -> Share {
    Share { name, num, den }
}

const ACTIVE_READING: &[Share] = &[
    share("Leitura preliminar", 1, 8),
    share("Leitura aprofundada com anotações", 1, 2),
    share("Revisão e síntese", 1, 8),
    share("Revisão final", 1, 4),
];
const FLASHCARDS: &[Share] = &[
    share("Criação de flashcards", 1, 3),
    share("Primeira sessão de revisão", 1, 3),
    share("Revisão espaçada", 1, 3),
];
const MIND_MAPS: &[Share] = &[
    share("Brainstorming de conceitos", 1, 4),
    share("Criação do mapa mental", 1, 2),
    share("Revisão e conexões", 1, 4),
];
const PROBLEM_SOLVING: &[Share] = &[
    share("Estudo da teoria básica", 1, 3),
    share("Resolução de problemas guiados", 1, 2),
    share("Prática independente", 1, 6),
];
const GROUP_STUDY: &[Share] = &[
    share("Preparação individual", 1, 4),
    share("Discussão em grupo", 1, 2),
    share("Síntese coletiva", 1, 4),
];
const MULTIMEDIA: &[Share] = &[
    share("Visualização de vídeo introdutório", 1, 3),
    share("Aprofundamento multimídia", 1, 3),
    share("Revisão ativa", 1, 3),
];
const SUMMARIES: &[Share] = &[
    share("Leitura e sublinhado", 1, 3),
    share("Criação de resumo", 1, 2),
    share("Revisão do esquema", 1, 6),
];
const SIMULATIONS: &[Share] = &[
    share("Estudo preparatório", 1, 4),
    share("Simulação prática", 1, 2),
    share("Análise de erros", 1, 4),
];
const GENERIC: &[Share] = &[
    share("Estudo preparatório", 1, 4),
    share("Prática guiada", 1, 2),
    share("Revisão de erros", 1, 4),
];

fn template(method: Option<StudyMethod>) -> &'static [Share] {
    match method {
        Some(StudyMethod::ActiveReading) => ACTIVE_READING,
        Some(StudyMethod::Flashcards) => FLASHCARDS,
        Some(StudyMethod::MindMaps) => MIND_MAPS,
        Some(StudyMethod::ProblemSolving) => PROBLEM_SOLVING,
        Some(StudyMethod::GroupStudy) => GROUP_STUDY,
        Some(StudyMethod::Multimedia) => MULTIMEDIA,
        Some(StudyMethod::Summaries) => SUMMARIES,
        Some(StudyMethod::Simulations) => SIMULATIONS,
        None => GENERIC,
    }
}

/// One timed activity of a plan.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Activity {
    pub name: &'static str,
    pub minutes: u32,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} min)", self.name, self.minutes)
    }
}

/// Ordered activities for one session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StudyPlan {
    pub budget_minutes: u32,
    pub activities: Vec<Activity>,
}

impl StudyPlan {
    pub fn total_minutes(&self) -> u32 {
        self.activities.iter().map(|a| a.minutes).sum()
    }

    /// Activities rendered as `"<name> (<minutes> min)"`.
    pub fn lines(&self) -> Vec<String> {
        self.activities.iter().map(ToString::to_string).collect()
    }
}

/// Split `budget` across the template of `method`; `None` uses the generic template.
pub fn plan_for_budget(method: Option<StudyMethod>, budget: u32) -> StudyPlan {
    let activities = template(method)
        .iter()
        .map(|s| Activity {
            name: s.name,
            minutes: (u64::from(budget) * u64::from(s.num) / u64::from(s.den)) as u32,
        })
        .collect();
    StudyPlan {
        budget_minutes: budget,
        activities,
    }
}

/// Plan a session. `difficulty` only influences which method was chosen upstream.
pub fn plan(method: StudyMethod, time_available: &str, _difficulty: &str) -> StudyPlan {
    plan_for_budget(Some(method), budget_minutes(time_available))
}

/// Plan a session for a method given by name; unknown names get the generic template.
pub fn plan_by_name(method: &str, time_available: &str, difficulty: &str) -> StudyPlan {
    match StudyMethod::parse(method) {
        Some(method) => plan(method, time_available, difficulty),
        None => plan_for_budget(None, budget_minutes(time_available)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tiers_map_to_budgets() {
        assert_eq!(budget_minutes("1-2 horas"), 90);
        assert_eq!(budget_minutes("3-4 horas"), 210);
        assert_eq!(budget_minutes("5+ horas"), 300);
        assert_eq!(budget_minutes("N/A"), 120);
    }

    #[test]
    fn unknown_tier_uses_default_budget() {
        let plan = plan(StudyMethod::GroupStudy, "N/A", "Alta");
        assert_eq!(plan.budget_minutes, 120);
        assert_eq!(
            plan.lines(),
            vec![
                "Preparação individual (30 min)",
                "Discussão em grupo (60 min)",
                "Síntese coletiva (30 min)",
            ]
        );
    }

    #[test]
    fn mind_map_plan_for_medium_tier() {
        let plan = plan(StudyMethod::MindMaps, "3-4 horas", "Média");
        assert_eq!(plan.activities.len(), 3);
        assert_eq!(plan.total_minutes(), 52 + 105 + 52);
        assert!(plan.total_minutes() <= 210);
    }

    #[test]
    fn active_reading_has_four_activities() {
        let plan = plan(StudyMethod::ActiveReading, "1-2 horas", "Baixa");
        assert_eq!(
            plan.lines(),
            vec![
                "Leitura preliminar (11 min)",
                "Leitura aprofundada com anotações (45 min)",
                "Revisão e síntese (11 min)",
                "Revisão final (22 min)",
            ]
        );
    }

    #[test]
    fn unknown_method_gets_generic_template() {
        let plan = plan_by_name("Leitura ativa e anotaçõesXX", "5+ horas", "Alta");
        let names: Vec<_> = plan.activities.iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec!["Estudo preparatório", "Prática guiada", "Revisão de erros"]
        );
        assert_eq!(plan.total_minutes(), 75 + 150 + 75);
    }

    #[test]
    fn every_method_and_tier_stays_within_budget() {
        for &method in StudyMethod::ALL {
            for &tier in TimeAvailable::ALL {
                let p = plan(method, tier.as_str(), "Média");
                assert!((3..=4).contains(&p.activities.len()));
                assert!(p.total_minutes() <= p.budget_minutes, "{method} {tier}");
            }
        }
    }

    proptest! {
        #[test]
        fn any_budget_is_never_exceeded(budget in 0u32..100_000, idx in 0usize..9) {
            let method = StudyMethod::ALL.get(idx).copied();
            let p = plan_for_budget(method, budget);
            prop_assert!(p.total_minutes() <= budget);
        }
    }
}
