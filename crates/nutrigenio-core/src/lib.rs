//! NutriGênio core library.
//! Guided nutrition assessment (name, height, weight, goal), BMI metrics and canned advice.

pub mod assessment;
pub mod chart;
pub mod config;
pub mod error;
pub mod message_log;
pub mod metrics;
pub mod prompts;
pub mod responder;
pub mod scheduler;
pub mod session;
pub mod tracker;

pub use assessment::{Assessment, AssessmentStage, BotReply, InputError, Transition, UserProfile};
pub use chart::{BmiChart, BMI_BANDS};
pub use self::config::ChatConfig;
pub use error::ConfigError;
pub use message_log::{Message, MessageId, MessageLog, Sender};
pub use metrics::{
    category_for_bmi, compute_bmi, ideal_weight_range, suggested_goal_weight, BmiCategory,
    WeightDirection, WeightRange,
};
pub use responder::select_reply;
pub use scheduler::DeferredTask;
pub use session::{ChatSession, SessionStatus, SubmitOutcome};
pub use tracker::{GoalBoard, TrackerError, WeightLog};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
