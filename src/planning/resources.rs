//! Static catalog of tools recommended for each method.

use crate::data::domain::StudyMethod;

pub fn resources(method: StudyMethod) -> &'static [&'static str] {
    match method {
        StudyMethod::ActiveReading => &[
            "Anki para revisão",
            "Notion para organização",
            "Modelo Cornell Notes",
        ],
        StudyMethod::Flashcards => &["Anki", "Quizlet", "RemNote"],
        StudyMethod::MindMaps => &["MindMeister", "XMind", "SimpleMind"],
        StudyMethod::ProblemSolving => &[
            "Khan Academy",
            "Exercícios da Coursera",
            "Plataformas de programação",
        ],
        StudyMethod::GroupStudy => &[
            "Grupos de estudo no Discord",
            "Sessões no Zoom",
            "Fóruns de estudo",
        ],
        StudyMethod::Multimedia => &["YouTube educacional", "TED-Ed", "Vídeos da Coursera"],
        StudyMethod::Summaries => &[
            "Obsidian",
            "Modelos do Notion",
            "Ferramentas de mapas mentais",
        ],
        StudyMethod::Simulations => &[
            "Testes práticos",
            "Software de simulação",
            "Plataformas de quiz",
        ],
    }
}

/// Resources for a method given by name; unknown names yield an empty list.
pub fn resources_by_name(method: &str) -> &'static [&'static str] {
    StudyMethod::parse(method).map(resources).unwrap_or(&[])
}
