//! Slash commands handled by the terminal front-end, outside the assessment flow.

use chrono::NaiveDate;
use nutrigenio_core::metrics::{category_for_bmi, compute_bmi, format_measure, parse_measure};
use nutrigenio_core::tracker::{default_target_date, GoalBoard, GoalId, WeightLog};
use nutrigenio_core::UserProfile;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    RecordWeight(String),
    Progress,
    AddGoal(String),
    ListGoals,
    ToggleGoal(String),
    Help,
    Unknown(String),
}

impl Command {
    /// `None` for ordinary chat text.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim().to_string()),
            None => (rest, String::new()),
        };
        Some(match name.to_lowercase().as_str() {
            "sair" => Self::Quit,
            "peso" => Self::RecordWeight(arg),
            "progresso" => Self::Progress,
            "meta" => Self::AddGoal(arg),
            "metas" => Self::ListGoals,
            "concluir" => Self::ToggleGoal(arg),
            "ajuda" => Self::Help,
            other => Self::Unknown(other.to_string()),
        })
    }
}

pub const HELP: &str = "Comandos: /peso <kg>, /progresso, /meta <texto>, /metas, /concluir <n>, /sair";

/// Tracker state owned by the front-end for the lifetime of the process.
#[derive(Debug, Default)]
pub struct Dashboard {
    weights: WeightLog,
    goals: GoalBoard,
}

impl Dashboard {
    /// Runs a non-quit command and returns the text to print.
    pub fn run(&mut self, command: &Command, profile: &UserProfile, today: NaiveDate) -> String {
        match command {
            Command::RecordWeight(arg) => self.record_weight(arg, profile, today),
            Command::Progress => self.progress(),
            Command::AddGoal(title) => match self.goals.add(title, default_target_date(today)) {
                Ok(_) => format!("Meta adicionada! Prazo: {}.", default_target_date(today).format("%d/%m/%Y")),
                Err(e) => {
                    tracing::debug!(error = %e, "goal rejected");
                    "Descreva a meta, por exemplo: /meta Beber 2 litros de água por dia".to_string()
                }
            },
            Command::ListGoals => self.list_goals(),
            Command::ToggleGoal(arg) => self.toggle_goal(arg),
            Command::Help | Command::Unknown(_) | Command::Quit => HELP.to_string(),
        }
    }

    fn record_weight(&mut self, arg: &str, profile: &UserProfile, today: NaiveDate) -> String {
        let Some(weight) = parse_measure(arg) else {
            return "Informe o peso em quilogramas, por exemplo: /peso 69.5".to_string();
        };
        if let Err(e) = self.weights.record(today, weight) {
            tracing::warn!(error = %e, "weight entry rejected");
            return "Não foi possível registrar esse peso.".to_string();
        }
        match profile.height {
            Some(height) => {
                let bmi = compute_bmi(weight, height);
                format!(
                    "Peso de {} kg registrado. IMC atual: {} ({}).",
                    format_measure(weight),
                    format_measure(bmi),
                    category_for_bmi(bmi).label()
                )
            }
            None => format!("Peso de {} kg registrado.", format_measure(weight)),
        }
    }

    fn progress(&self) -> String {
        if self.weights.entries().is_empty() {
            return "Nenhum registro de peso ainda. Use /peso <kg>.".to_string();
        }
        let mut lines: Vec<String> = self
            .weights
            .entries()
            .iter()
            .map(|e| format!("  {}  {} kg", e.date.format("%d/%m/%Y"), format_measure(e.weight)))
            .collect();
        if let Some(change) = self.weights.change_since_first() {
            let sign = if change > 0.0 { "+" } else { "" };
            lines.push(format!("  Variação: {}{} kg", sign, format_measure(change)));
        }
        lines.join("\n")
    }

    fn list_goals(&self) -> String {
        if self.goals.goals().is_empty() {
            return "Você ainda não definiu nenhuma meta. Use /meta <texto>.".to_string();
        }
        let mut lines: Vec<String> = self
            .goals
            .goals()
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let mark = if g.completed { "x" } else { " " };
                format!("  {}. [{}] {} (até {})", i + 1, mark, g.title, g.target_date.format("%d/%m/%Y"))
            })
            .collect();
        lines.push(format!("  Progresso geral: {}%", self.goals.completion_percentage()));
        lines.join("\n")
    }

    /// `n` is the 1-based position shown by `/metas`.
    fn toggle_goal(&mut self, arg: &str) -> String {
        let id: Option<GoalId> = arg
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.goals.goals().get(i))
            .map(|g| g.id);
        match id.map(|id| self.goals.toggle(id)) {
            Some(Ok(true)) => "Meta concluída!".to_string(),
            Some(Ok(false)) => "Meta reaberta.".to_string(),
            _ => "Informe o número da meta, por exemplo: /concluir 1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 1).unwrap()
    }

    #[test]
    fn parses_commands_and_ignores_chat() {
        assert_eq!(Command::parse("oi"), None);
        assert_eq!(Command::parse("/sair"), Some(Command::Quit));
        assert_eq!(Command::parse(" /peso  69,5 "), Some(Command::RecordWeight("69,5".into())));
        assert_eq!(Command::parse("/META Dormir cedo"), Some(Command::AddGoal("Dormir cedo".into())));
        assert_eq!(Command::parse("/xyz"), Some(Command::Unknown("xyz".into())));
    }

    #[test]
    fn weight_command_reports_bmi_when_height_known() {
        let mut dash = Dashboard::default();
        let profile = UserProfile { height: Some(170.0), ..UserProfile::default() };
        let out = dash.run(&Command::RecordWeight("70".into()), &profile, today());
        assert!(out.contains("IMC atual: 24.2"), "{}", out);
        let out = dash.run(&Command::RecordWeight("abc".into()), &profile, today());
        assert!(out.contains("/peso"));
        assert_eq!(dash.weights.entries().len(), 1);
    }

    #[test]
    fn goals_can_be_added_and_completed() {
        let mut dash = Dashboard::default();
        let profile = UserProfile::default();
        dash.run(&Command::AddGoal("Caminhar 30 min".into()), &profile, today());
        dash.run(&Command::AddGoal("Comer frutas".into()), &profile, today());
        assert_eq!(dash.run(&Command::ToggleGoal("1".into()), &profile, today()), "Meta concluída!");
        let list = dash.run(&Command::ListGoals, &profile, today());
        assert!(list.contains("[x] Caminhar 30 min (até 31/05/2026)"), "{}", list);
        assert!(list.contains("Progresso geral: 50%"));
        assert!(dash.run(&Command::ToggleGoal("9".into()), &profile, today()).contains("/concluir"));
        assert!(dash.run(&Command::ToggleGoal("0".into()), &profile, today()).contains("/concluir"));
    }

    #[test]
    fn progress_shows_change() {
        let mut dash = Dashboard::default();
        let profile = UserProfile::default();
        assert!(dash.run(&Command::Progress, &profile, today()).contains("Nenhum"));
        dash.run(&Command::RecordWeight("72".into()), &profile, today());
        dash.run(&Command::RecordWeight("70.5".into()), &profile, today());
        let out = dash.run(&Command::Progress, &profile, today());
        assert!(out.contains("Variação: -1.5 kg"), "{}", out);
    }
}
