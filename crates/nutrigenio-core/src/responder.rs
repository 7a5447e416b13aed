//! Canned nutrition advice for the free chat that follows the assessment.
//!
//! Keyword rules are checked in order against the lowercased input; the first hit wins.
//! Without a hit, a general tip is drawn at random from [`FALLBACK_TIPS`].

use rand::seq::SliceRandom;
use rand::Rng;

pub const HYDRATION_REPLY: &str = "A hidratação adequada é essencial! Beber água suficiente ajuda no metabolismo, na digestão e pode até reduzir a sensação de fome. Tente manter uma garrafa de água sempre por perto e estabeleça metas de consumo ao longo do dia.";

pub const PROTEIN_REPLY: &str = "As proteínas são fundamentais para a saciedade e manutenção da massa muscular. Boas fontes incluem frango, peixe, ovos, laticínios com baixo teor de gordura, tofu e leguminosas. Tente incluir uma fonte de proteína em cada refeição principal.";

pub const CARBOHYDRATE_REPLY: &str = "Os carboidratos não são vilões! Opte por fontes complexas como grãos integrais, batata doce, frutas e legumes. Eles fornecem energia sustentada e são ricos em fibras e nutrientes essenciais.";

pub const WEIGHT_LOSS_REPLY: &str = "A perda de peso saudável envolve uma combinação de alimentação equilibrada, atividade física regular e hábitos de vida saudáveis. É importante estabelecer metas realistas e fazer mudanças que você possa manter a longo prazo. Foque em escolhas nutritivas, porções adequadas e em aprender a reconhecer os sinais de fome e saciedade do seu corpo.";

pub const HUNGER_REPLY: &str = "Controlar o apetite pode ser um desafio. Estratégias úteis incluem consumir alimentos ricos em fibras e proteínas, beber água antes das refeições, praticar alimentação consciente e garantir sono adequado. Também é importante distinguir entre fome física e emocional.";

pub const MOTIVATION_REPLY: &str = "Manter a motivação é fundamental! Estabeleça metas pequenas e alcançáveis, celebre seus sucessos, encontre um parceiro de responsabilidade e lembre-se do porquê você começou esta jornada. Também é útil se concentrar nos benefícios não relacionados ao peso, como ter mais energia, melhor humor e saúde geral aprimorada.";

/// Ordered topic rules: (keywords, reply).
pub const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["água", "agua", "hidratação", "hidratacao"], HYDRATION_REPLY),
    (&["proteína", "proteina"], PROTEIN_REPLY),
    (&["carboidrato"], CARBOHYDRATE_REPLY),
    (&["gordo", "obesidade", "emagrecer"], WEIGHT_LOSS_REPLY),
    (&["fome", "apetite"], HUNGER_REPLY),
    (&["motivação", "motivacao", "desistir"], MOTIVATION_REPLY),
];

pub const FALLBACK_TIPS: &[&str] = &[
    "Baseado nas suas necessidades, recomendo aumentar o consumo de proteínas magras e vegetais de folhas verdes. Isso ajudará a manter a saciedade por mais tempo.",
    "Para atingir seus objetivos de perda de peso, é importante criar um déficit calórico moderado. Tente reduzir cerca de 300-500 calorias por dia da sua ingestão atual.",
    "Manter-se hidratado é fundamental para o metabolismo e para controlar a fome. Procure beber pelo menos 2 litros de água por dia.",
    "Os carboidratos complexos como aveia, batata doce e arroz integral são excelentes para quem busca energia duradoura e controle do apetite.",
    "Planeje suas refeições com antecedência. Isso pode ajudar a evitar escolhas impulsivas que geralmente não são saudáveis.",
    "Lembre-se que consistência é mais importante que perfeição. Pequenas mudanças sustentáveis têm mais impacto a longo prazo do que dietas restritivas.",
    "Considere incluir mais alimentos ricos em fibras na sua dieta. Eles ajudam a promover a sensação de saciedade e melhoram a digestão.",
    "A qualidade do sono afeta diretamente seus hormônios relacionados à fome. Procure dormir 7-8 horas por noite para melhores resultados.",
    "Tente comer devagar e prestar atenção à sua refeição. A alimentação consciente pode ajudar a evitar o consumo excessivo.",
    "Pequenas refeições a cada 3-4 horas podem ajudar a manter o metabolismo ativo e evitar a fome excessiva.",
];

/// Reply for the first keyword rule the input hits (case-insensitive substring match).
pub fn keyword_reply(input: &str) -> Option<&'static str> {
    let lower = input.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
}

pub fn select_reply_with<R: Rng + ?Sized>(input: &str, rng: &mut R) -> &'static str {
    if let Some(reply) = keyword_reply(input) {
        tracing::debug!("canned reply matched a topic keyword");
        return reply;
    }
    FALLBACK_TIPS.choose(rng).copied().unwrap_or(FALLBACK_TIPS[0])
}

pub fn select_reply(input: &str) -> &'static str {
    select_reply_with(input, &mut rand::thread_rng())
}
