// src/services/lifecycle.rs
//
// Automação de follow-up do funil: cada transição de status agenda o próximo
// contato, mas só quando ninguém (nem humano, nem agendamento anterior) já
// definiu um. Won/Lost encerram a automação.

use chrono::{DateTime, Duration, Utc};

use crate::models::lead::LeadStatus;

/// Prazo de próximo contato para um status recém-assumido.
/// `None` = status terminal para a automação.
pub fn auto_follow_up(status: LeadStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match status {
        LeadStatus::New => Some(now + Duration::hours(24)),
        LeadStatus::Contacted => Some(now + Duration::days(2)),
        LeadStatus::Qualified => Some(now + Duration::days(3)),
        LeadStatus::EstimateSent => Some(now + Duration::hours(24)),
        LeadStatus::Scheduled => Some(now + Duration::days(7)),
        LeadStatus::Won | LeadStatus::Lost => None,
    }
}

/// Decide o que gravar em `next_follow_up_at` num PATCH de lead.
///
/// Retorna `None` = não mexe no campo. A automação só preenche lacuna:
/// exige transição real de status, nenhum valor explícito no request e
/// nenhum follow-up já existente no registro.
pub fn resolve_next_follow_up(
    status_changed: bool,
    explicit: Option<DateTime<Utc>>,
    existing: Option<DateTime<Utc>>,
    new_status: LeadStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    // Valor explícito do humano sempre vence
    if explicit.is_some() {
        return explicit;
    }
    if status_changed && existing.is_none() {
        return auto_follow_up(new_status, now);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn policy_table_offsets() {
        let now = t0();
        assert_eq!(auto_follow_up(LeadStatus::New, now), Some(now + Duration::hours(24)));
        assert_eq!(auto_follow_up(LeadStatus::Contacted, now), Some(now + Duration::days(2)));
        assert_eq!(auto_follow_up(LeadStatus::Qualified, now), Some(now + Duration::days(3)));
        assert_eq!(
            auto_follow_up(LeadStatus::EstimateSent, now),
            Some(now + Duration::hours(24))
        );
        assert_eq!(auto_follow_up(LeadStatus::Scheduled, now), Some(now + Duration::days(7)));
    }

    #[test]
    fn won_and_lost_never_schedule() {
        assert_eq!(auto_follow_up(LeadStatus::Won, t0()), None);
        assert_eq!(auto_follow_up(LeadStatus::Lost, t0()), None);
    }

    #[test]
    fn transition_without_existing_value_fills_the_gap() {
        // New -> Contacted sem follow-up: automação agenda +2 dias
        let now = t0();
        let got = resolve_next_follow_up(true, None, None, LeadStatus::Contacted, now);
        assert_eq!(got, Some(now + Duration::days(2)));
    }

    #[test]
    fn existing_value_is_never_overwritten_by_automation() {
        let now = t0();
        let existing = Some(now + Duration::days(1));
        let got = resolve_next_follow_up(true, None, existing, LeadStatus::Scheduled, now);
        assert_eq!(got, None, "automação não pode sobrescrever valor existente");
    }

    #[test]
    fn explicit_value_always_wins() {
        let now = t0();
        let explicit = Some(now + Duration::days(14));
        let existing = Some(now + Duration::days(1));
        let got = resolve_next_follow_up(true, explicit, existing, LeadStatus::Won, now);
        assert_eq!(got, explicit);

        // Mesmo sem transição de status
        let got = resolve_next_follow_up(false, explicit, None, LeadStatus::New, now);
        assert_eq!(got, explicit);
    }

    #[test]
    fn no_transition_means_no_automation() {
        let got = resolve_next_follow_up(false, None, None, LeadStatus::Qualified, t0());
        assert_eq!(got, None);
    }

    #[test]
    fn terminal_transition_with_gap_still_writes_nothing() {
        let got = resolve_next_follow_up(true, None, None, LeadStatus::Lost, t0());
        assert_eq!(got, None);
    }
}
