use uuid::Uuid;

string_enum!(
    LeadStatus {
        Pending => "pending",
        Contacted => "contacted",
        Converted => "converted",
        Rejected => "rejected",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadTransitionError {
    #[error("Informe a ordem de serviço gerada a partir do lead")]
    MissingConvertedOrder,
}

/// Resolve the `converted_order_id` a lead carries after moving to `target`.
///
/// Only `converted` links an order, and it must name one; every other status
/// clears the link.
pub fn converted_order_for(
    target: LeadStatus,
    converted_order_id: Option<Uuid>,
) -> Result<Option<Uuid>, LeadTransitionError> {
    match target {
        LeadStatus::Converted => converted_order_id
            .map(Some)
            .ok_or(LeadTransitionError::MissingConvertedOrder),
        _ => Ok(None),
    }
}
