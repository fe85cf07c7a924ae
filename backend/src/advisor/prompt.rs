//! Prompt templates and fallback answers. The assistant speaks Italian.

use crate::domain::models::care_log::CareLog;
use crate::domain::models::cat::Cat;

/// Only the most recent logs are worth the prompt space
pub const MAX_PROMPT_LOGS: usize = 10;

pub const ADVICE_ERROR_FALLBACK: &str = "Si è verificato un errore nel contattare l'assistente AI.";
pub const ADVICE_EMPTY_FALLBACK: &str =
    "Mi dispiace, non sono riuscito a generare una risposta al momento.";
pub const VISION_ERROR_FALLBACK: &str = "Errore durante l'analisi dell'immagine.";
pub const VISION_EMPTY_FALLBACK: &str = "Non sono riuscito ad analizzare l'immagine.";

const LOG_DATE_FORMAT: &str = "%d/%m/%Y";

/// Render one log as a summary line: `- 04/03/2025 [Peso]: notes (4.3)`
pub fn log_line(log: &CareLog) -> String {
    let mut line = format!(
        "- {} [{}]: {}",
        log.timestamp.format(LOG_DATE_FORMAT),
        log.log_type.literal(),
        log.notes
    );
    if let Some(value) = log.value.as_deref().filter(|v| !v.is_empty()) {
        line.push_str(&format!(" ({})", value));
    }
    line
}

pub fn advice_prompt(cat: &Cat, recent_logs: &[CareLog], question: &str) -> String {
    let logs_summary = recent_logs
        .iter()
        .take(MAX_PROMPT_LOGS)
        .map(log_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Sei un esperto assistente veterinario e comportamentista felino.

Profilo Gatto:
- Nome: {name}
- Razza: {breed}
- Età: {age} anni
- Peso: {weight} kg
- Sesso: {gender}

Attività Recenti:
{logs_summary}

Domanda dell'utente: \"{question}\"

Rispondi in italiano in modo amichevole, conciso e professionale. Se la situazione sembra grave, consiglia sempre di visitare un veterinario reale.",
        name = cat.name,
        breed = cat.breed,
        age = cat.age,
        weight = cat.weight,
        gender = cat.gender,
        logs_summary = logs_summary,
        question = question,
    )
}

pub fn vision_prompt(user_prompt: &str) -> String {
    format!(
        "Sei un esperto di gatti. {}. Rispondi in italiano.",
        user_prompt.trim()
    )
}
