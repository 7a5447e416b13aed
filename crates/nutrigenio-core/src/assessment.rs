//! Guided assessment: collects name, height, weight and goal, then hands over to canned chat.
//!
//! [`Assessment::advance`] is the only place stage and profile change. It returns the bot
//! replies for the turn; scheduling and appending them is the caller's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::{
    category_for_bmi, compute_bmi, ideal_weight_range, parse_measure, suggested_goal_weight,
    WeightDirection,
};
use crate::prompts;
use crate::responder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStage {
    Initial,
    AskName,
    AskHeight,
    AskWeight,
    AskGoal,
    Completed,
}

impl AssessmentStage {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::AskName => "ask_name",
            Self::AskHeight => "ask_height",
            Self::AskWeight => "ask_weight",
            Self::AskGoal => "ask_goal",
            Self::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    /// Centimeters.
    pub height: Option<f64>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub weight_goal: Option<f64>,
    pub fitness_goal: Option<WeightDirection>,
}

/// Rejected input for the current stage. The display text is sent to the visitor as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Não consegui entender sua altura. Por favor, informe um número positivo em centímetros (ex.: 170).")]
    InvalidHeight,
    #[error("Não consegui entender seu peso. Por favor, informe um número positivo em quilogramas (ex.: 70).")]
    InvalidWeight,
    #[error("Não reconheci seu objetivo. Responda 1 para perder peso, 2 para manter o peso ou 3 para ganhar peso.")]
    InvalidGoal,
}

/// One unit of bot output.
#[derive(Debug, Clone, PartialEq)]
pub enum BotReply {
    Text(String),
    /// Render the BMI chart from the current profile.
    Chart,
}

/// Result of feeding one user message to the machine.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: AssessmentStage,
    pub to: AssessmentStage,
    pub replies: Vec<BotReply>,
    pub rejected: Option<InputError>,
}

impl Transition {
    pub fn advanced(&self) -> bool {
        self.from != self.to
    }
}

/// Goal tokens are checked lose, maintain, gain; the first hit wins.
pub fn parse_goal(text: &str) -> Option<WeightDirection> {
    let lower = text.to_lowercase();
    if lower.contains('1') || lower.contains("perder") {
        Some(WeightDirection::Lose)
    } else if lower.contains('2') || lower.contains("manter") {
        Some(WeightDirection::Maintain)
    } else if lower.contains('3') || lower.contains("ganhar") {
        Some(WeightDirection::Gain)
    } else {
        None
    }
}

#[derive(Debug, Clone)]
pub struct Assessment {
    stage: AssessmentStage,
    profile: UserProfile,
}

impl Default for Assessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment {
    pub fn new() -> Self {
        Self {
            stage: AssessmentStage::Initial,
            profile: UserProfile::default(),
        }
    }

    pub fn stage(&self) -> AssessmentStage {
        self.stage
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Opening message, shown before the first submission.
    pub fn greeting(bot_name: &str) -> String {
        prompts::welcome(bot_name)
    }

    /// Applies one user message. The caller filters out blank input.
    pub fn advance(&mut self, input: &str) -> Transition {
        let from = self.stage;
        let outcome = match from {
            AssessmentStage::Initial => Ok(self.enter_ask_name()),
            AssessmentStage::AskName => Ok(self.enter_ask_height(input.trim())),
            AssessmentStage::AskHeight => parse_measure(input)
                .map(|height| self.enter_ask_weight(height))
                .ok_or(InputError::InvalidHeight),
            AssessmentStage::AskWeight => parse_measure(input)
                .map(|weight| self.enter_ask_goal(weight))
                .ok_or(InputError::InvalidWeight),
            AssessmentStage::AskGoal => parse_goal(input)
                .map(|direction| self.enter_completed(direction))
                .ok_or(InputError::InvalidGoal),
            AssessmentStage::Completed => {
                Ok(vec![BotReply::Text(responder::select_reply(input).to_string())])
            }
        };

        match outcome {
            Ok(replies) => {
                if from != self.stage {
                    tracing::info!(from = from.as_str(), to = self.stage.as_str(), "assessment stage advanced");
                }
                Transition { from, to: self.stage, replies, rejected: None }
            }
            Err(err) => {
                tracing::debug!(stage = from.as_str(), error = ?err, "assessment input rejected");
                Transition {
                    from,
                    to: from,
                    replies: vec![BotReply::Text(err.to_string())],
                    rejected: Some(err),
                }
            }
        }
    }

    fn enter_ask_name(&mut self) -> Vec<BotReply> {
        self.stage = AssessmentStage::AskName;
        vec![BotReply::Text(prompts::ASK_NAME.to_string())]
    }

    fn enter_ask_height(&mut self, name: &str) -> Vec<BotReply> {
        self.profile.name = name.to_string();
        self.stage = AssessmentStage::AskHeight;
        vec![BotReply::Text(prompts::ask_height(&self.profile.name))]
    }

    fn enter_ask_weight(&mut self, height: f64) -> Vec<BotReply> {
        self.profile.height = Some(height);
        self.stage = AssessmentStage::AskWeight;
        vec![BotReply::Text(prompts::ASK_WEIGHT.to_string())]
    }

    fn enter_ask_goal(&mut self, weight: f64) -> Vec<BotReply> {
        // AskWeight is only entered after height is stored.
        let Some(height) = self.profile.height else {
            tracing::error!("ask_weight reached without a stored height");
            return vec![BotReply::Text(InputError::InvalidHeight.to_string())];
        };
        let bmi = compute_bmi(weight, height);
        self.profile.weight = Some(weight);
        self.profile.bmi = Some(bmi);
        self.stage = AssessmentStage::AskGoal;
        vec![
            BotReply::Chart,
            BotReply::Text(prompts::bmi_report(
                bmi,
                category_for_bmi(bmi),
                ideal_weight_range(height),
            )),
        ]
    }

    fn enter_completed(&mut self, direction: WeightDirection) -> Vec<BotReply> {
        let (Some(height), Some(weight), Some(bmi)) =
            (self.profile.height, self.profile.weight, self.profile.bmi)
        else {
            tracing::error!("ask_goal reached without stored measurements");
            return vec![BotReply::Text(InputError::InvalidWeight.to_string())];
        };
        let target = suggested_goal_weight(weight, height, direction);
        self.profile.fitness_goal = Some(direction);
        self.profile.weight_goal = Some(target);
        self.stage = AssessmentStage::Completed;
        let text = prompts::summary(&prompts::Summary {
            name: &self.profile.name,
            height,
            weight,
            bmi,
            category: category_for_bmi(bmi),
            ideal: ideal_weight_range(height),
            direction,
            target,
        });
        vec![BotReply::Chart, BotReply::Text(text)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_stage(stage: AssessmentStage) -> Assessment {
        let mut a = Assessment::new();
        for input in ["oi", "Maria", "170", "70", "1"] {
            if a.stage() == stage {
                break;
            }
            a.advance(input);
        }
        assert_eq!(a.stage(), stage);
        a
    }

    #[test]
    fn any_text_starts_the_assessment() {
        let mut a = Assessment::new();
        let t = a.advance("quero começar");
        assert_eq!(t.to, AssessmentStage::AskName);
        assert_eq!(t.replies, vec![BotReply::Text(prompts::ASK_NAME.to_string())]);
    }

    #[test]
    fn name_is_trimmed_and_echoed() {
        let mut a = at_stage(AssessmentStage::AskName);
        let t = a.advance("  Maria  ");
        assert_eq!(a.profile().name, "Maria");
        assert_eq!(t.to, AssessmentStage::AskHeight);
        match &t.replies[..] {
            [BotReply::Text(s)] => assert!(s.contains("Maria")),
            other => panic!("unexpected replies {:?}", other),
        }
    }

    #[test]
    fn invalid_height_keeps_stage_and_profile() {
        let mut a = at_stage(AssessmentStage::AskHeight);
        for _ in 0..3 {
            let t = a.advance("abc");
            assert_eq!(t.rejected, Some(InputError::InvalidHeight));
            assert_eq!(t.replies.len(), 1);
            assert!(!t.advanced());
            assert_eq!(a.stage(), AssessmentStage::AskHeight);
            assert_eq!(a.profile().height, None);
        }
        let t = a.advance("-5");
        assert_eq!(t.rejected, Some(InputError::InvalidHeight));
    }

    #[test]
    fn weight_step_computes_bmi_and_emits_chart() {
        let mut a = at_stage(AssessmentStage::AskWeight);
        let t = a.advance("70");
        assert_eq!(a.stage(), AssessmentStage::AskGoal);
        assert_eq!(a.profile().weight, Some(70.0));
        assert!((a.profile().bmi.unwrap() - 24.2).abs() < 0.05);
        assert_eq!(t.replies.iter().filter(|r| **r == BotReply::Chart).count(), 1);
        assert_eq!(t.replies[0], BotReply::Chart);
    }

    #[test]
    fn invalid_weight_message_differs_from_height() {
        let mut a = at_stage(AssessmentStage::AskWeight);
        let t = a.advance("0");
        assert_eq!(t.rejected, Some(InputError::InvalidWeight));
        assert_ne!(InputError::InvalidWeight.to_string(), InputError::InvalidHeight.to_string());
        assert_eq!(a.profile().bmi, None);
    }

    #[test]
    fn goal_tokens() {
        assert_eq!(parse_goal("1"), Some(WeightDirection::Lose));
        assert_eq!(parse_goal("Quero PERDER uns quilos"), Some(WeightDirection::Lose));
        assert_eq!(parse_goal("2"), Some(WeightDirection::Maintain));
        assert_eq!(parse_goal("manter"), Some(WeightDirection::Maintain));
        assert_eq!(parse_goal("opção 3"), Some(WeightDirection::Gain));
        assert_eq!(parse_goal("ganhar massa"), Some(WeightDirection::Gain));
        assert_eq!(parse_goal("não sei"), None);
    }

    #[test]
    fn unrecognized_goal_is_rejected() {
        let mut a = at_stage(AssessmentStage::AskGoal);
        let t = a.advance("talvez");
        assert_eq!(t.rejected, Some(InputError::InvalidGoal));
        assert_eq!(a.profile().fitness_goal, None);
        assert_eq!(a.profile().weight_goal, None);
    }

    #[test]
    fn completion_emits_chart_then_summary() {
        let mut a = at_stage(AssessmentStage::AskGoal);
        let t = a.advance("1");
        assert_eq!(a.stage(), AssessmentStage::Completed);
        assert_eq!(a.profile().fitness_goal, Some(WeightDirection::Lose));
        assert_eq!(a.profile().weight_goal, Some(68.0));
        assert_eq!(t.replies.len(), 2);
        assert_eq!(t.replies[0], BotReply::Chart);
        match &t.replies[1] {
            BotReply::Text(s) => {
                for needle in ["Maria", "170", "70", "24.2"] {
                    assert!(s.contains(needle), "summary misses {}", needle);
                }
            }
            other => panic!("expected summary text, got {:?}", other),
        }
    }

    #[test]
    fn completed_is_absorbing() {
        let mut a = at_stage(AssessmentStage::Completed);
        let before = a.profile().clone();
        for input in ["1", "Maria", "180", "proteína"] {
            let t = a.advance(input);
            assert_eq!(t.to, AssessmentStage::Completed);
            assert_eq!(t.replies.len(), 1);
        }
        assert_eq!(a.profile(), &before);
    }
}
