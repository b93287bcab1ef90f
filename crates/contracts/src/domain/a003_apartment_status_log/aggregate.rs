use crate::enums::apartment_status::ApartmentStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Строка аудита смены статуса квартиры.
///
/// Append-only: создаётся ровно один раз на каждую мутацию статуса,
/// в той же транзакции БД, что и запись нового статуса. Не обновляется
/// и не удаляется.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApartmentStatusLog {
    pub id: i64,
    #[serde(rename = "apartmentId")]
    pub apartment_id: Uuid,
    #[serde(rename = "priorStatus")]
    pub prior_status: ApartmentStatus,
    #[serde(rename = "newStatus")]
    pub new_status: ApartmentStatus,
    #[serde(rename = "actorId")]
    pub actor_id: Uuid,
    pub reason: Option<String>,
    /// Произвольные метаданные операции (например, цена/дата продажи)
    pub details: Option<serde_json::Value>,
    #[serde(rename = "changedAt")]
    pub changed_at: chrono::DateTime<chrono::Utc>,
}

/// Детали продажи, сохраняемые в metadata строки аудита
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleDetails {
    #[serde(rename = "salePrice", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(rename = "saleDate", skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl SaleDetails {
    pub fn is_empty(&self) -> bool {
        self.sale_price.is_none() && self.sale_date.is_none()
    }
}

// ============================================================================
// Bulk operation results
// ============================================================================

/// Результат одного элемента массовой смены статуса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusItem {
    #[serde(rename = "apartmentId")]
    pub apartment_id: Uuid,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Сводка массовой смены статуса. Частичные отказы не прерывают пакет:
/// succeeded + failed всегда равно числу входных id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusSummary {
    pub results: Vec<BulkStatusItem>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BulkStatusSummary {
    pub fn from_results(results: Vec<BulkStatusItem>) -> Self {
        let succeeded = results.iter().filter(|r| r.ok).count();
        let failed = results.len() - succeeded;
        Self {
            results,
            succeeded,
            failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_sum_to_input_length() {
        let results = vec![
            BulkStatusItem {
                apartment_id: Uuid::new_v4(),
                ok: true,
                error: None,
            },
            BulkStatusItem {
                apartment_id: Uuid::new_v4(),
                ok: false,
                error: Some("not found".into()),
            },
            BulkStatusItem {
                apartment_id: Uuid::new_v4(),
                ok: true,
                error: None,
            },
        ];
        let summary = BulkStatusSummary::from_results(results);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.succeeded + summary.failed, summary.results.len());
    }

    #[test]
    fn empty_sale_details_serialize_to_empty_object() {
        let json = serde_json::to_value(SaleDetails::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
        assert!(SaleDetails::default().is_empty());
    }
}
