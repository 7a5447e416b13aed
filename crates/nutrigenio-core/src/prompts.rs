//! Bot copy for the guided assessment. Builders take only the profile fields they echo.

use crate::metrics::{format_measure, BmiCategory, WeightDirection, WeightRange};

pub fn welcome(bot_name: &str) -> String {
    format!(
        "Olá! Sou o {}, seu assistente de nutrição personalizado. \
         Vou fazer algumas perguntas rápidas para calcular seu IMC e sugerir uma meta de peso. \
         Vamos começar? Envie qualquer mensagem para continuar.",
        bot_name
    )
}

pub const ASK_NAME: &str = "Ótimo! Para começar, qual é o seu nome?";

pub fn ask_height(name: &str) -> String {
    format!(
        "Prazer em conhecer você, {}! Qual é a sua altura em centímetros? (ex.: 170)",
        name
    )
}

pub const ASK_WEIGHT: &str = "Perfeito! Agora, qual é o seu peso atual em quilogramas? (ex.: 70)";

pub const GOAL_MENU: &str = "Qual é o seu objetivo?\n1. Perder peso\n2. Manter o peso\n3. Ganhar peso";

pub fn bmi_report(bmi: f64, category: BmiCategory, ideal: WeightRange) -> String {
    format!(
        "Seu IMC é {}, o que indica {}. Para a sua altura, o peso ideal fica entre {} e {} kg.\n\n{}",
        format_measure(bmi),
        category.label(),
        format_measure(ideal.min),
        format_measure(ideal.max),
        GOAL_MENU
    )
}

/// Everything the final summary echoes back.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    pub name: &'a str,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub ideal: WeightRange,
    pub direction: WeightDirection,
    pub target: f64,
}

pub fn summary(s: &Summary<'_>) -> String {
    let advice = if (s.target - s.weight).abs() < 0.05 {
        "Seu peso já está na faixa saudável. O foco agora é manter bons hábitos de alimentação, sono e atividade física."
    } else if s.target < s.weight {
        "Sugiro um déficit calórico moderado, de 300 a 500 calorias por dia, com proteínas magras e bastante vegetais."
    } else {
        "Sugiro um superávit calórico moderado, priorizando proteínas e carboidratos complexos em todas as refeições."
    };
    format!(
        "{}, aqui está o seu resumo:\n\
         • Altura: {} cm\n\
         • Peso atual: {} kg\n\
         • IMC: {} ({})\n\
         • Peso ideal: {} a {} kg\n\
         • Objetivo: {}\n\
         • Meta sugerida: {} kg\n\n\
         {}\n\n\
         Agora você pode me perguntar sobre água, proteínas, carboidratos, fome ou motivação!",
        s.name,
        format_measure(s.height),
        format_measure(s.weight),
        format_measure(s.bmi),
        s.category.label(),
        format_measure(s.ideal.min),
        format_measure(s.ideal.max),
        s.direction.label(),
        format_measure(s.target),
        advice
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_prompt_echoes_name() {
        assert!(ask_height("Maria").contains("Maria"));
    }

    #[test]
    fn summary_mentions_every_measure() {
        let text = summary(&Summary {
            name: "Maria",
            height: 170.0,
            weight: 70.0,
            bmi: 24.2,
            category: BmiCategory::Normal,
            ideal: WeightRange { min: 53.5, max: 72.0 },
            direction: WeightDirection::Lose,
            target: 68.0,
        });
        for needle in ["Maria", "170 cm", "70 kg", "24.2", "68 kg", "perder peso"] {
            assert!(text.contains(needle), "missing {:?} in {}", needle, text);
        }
        assert!(text.contains("déficit"));
    }
}
