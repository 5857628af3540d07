//! Service order lifecycle.
//!
//! Orders move left to right through [`KANBAN_SEQUENCE`] on the board, but the
//! transition operation itself accepts any target status, including a jump to
//! `cancelled` from anywhere.

string_enum!(
    ServiceOrderStatus {
        Lead => "lead",
        AwaitingDevice => "awaiting_device",
        InAnalysis => "in_analysis",
        AwaitingApproval => "awaiting_approval",
        InRepair => "in_repair",
        Ready => "ready",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
);

/// Board columns, in forward order.
pub const KANBAN_SEQUENCE: [ServiceOrderStatus; 6] = [
    ServiceOrderStatus::AwaitingDevice,
    ServiceOrderStatus::InAnalysis,
    ServiceOrderStatus::AwaitingApproval,
    ServiceOrderStatus::InRepair,
    ServiceOrderStatus::Ready,
    ServiceOrderStatus::Delivered,
];

/// Statuses counted as open work on the dashboard.
pub const PENDING_STATUSES: [ServiceOrderStatus; 4] = [
    ServiceOrderStatus::AwaitingDevice,
    ServiceOrderStatus::InAnalysis,
    ServiceOrderStatus::AwaitingApproval,
    ServiceOrderStatus::InRepair,
];

pub const COMPLETED_STATUSES: [ServiceOrderStatus; 2] =
    [ServiceOrderStatus::Ready, ServiceOrderStatus::Delivered];

/// History note written when an order is opened.
pub const CREATED_NOTE: &str = "Ordem de serviço criada";

impl ServiceOrderStatus {
    /// The column after this one, or `None` at the end of the board and for
    /// statuses that are not columns.
    pub fn next(&self) -> Option<ServiceOrderStatus> {
        let index = KANBAN_SEQUENCE.iter().position(|s| s == self)?;
        KANBAN_SEQUENCE.get(index + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ServiceOrderStatus::Delivered | ServiceOrderStatus::Cancelled
        )
    }

    pub fn column_title(&self) -> &'static str {
        match self {
            ServiceOrderStatus::Lead => "Lead",
            ServiceOrderStatus::AwaitingDevice => "Aguardando Aparelho",
            ServiceOrderStatus::InAnalysis => "Em Análise",
            ServiceOrderStatus::AwaitingApproval => "Aguardando Aprovação",
            ServiceOrderStatus::InRepair => "Em Reparo",
            ServiceOrderStatus::Ready => "Pronto para Entrega",
            ServiceOrderStatus::Delivered => "Finalizado",
            ServiceOrderStatus::Cancelled => "Cancelado",
        }
    }
}

/// Milestone timestamp columns on a service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTimestamp {
    ReceivedAt,
    ApprovedAt,
    CompletedAt,
    DeliveredAt,
}

/// What a status change writes to the order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub previous: Option<ServiceOrderStatus>,
    pub status: ServiceOrderStatus,
    pub stamp: Option<StatusTimestamp>,
}

/// Plan the update for moving an order from `current` to `target`.
///
/// `received_at` is stamped on entering `in_analysis` unless the order is
/// already there; the other milestones are stamped every time.
pub fn plan_transition(
    current: Option<ServiceOrderStatus>,
    target: ServiceOrderStatus,
) -> StatusPatch {
    let stamp = match target {
        ServiceOrderStatus::InAnalysis if current != Some(ServiceOrderStatus::InAnalysis) => {
            Some(StatusTimestamp::ReceivedAt)
        }
        ServiceOrderStatus::InRepair => Some(StatusTimestamp::ApprovedAt),
        ServiceOrderStatus::Ready => Some(StatusTimestamp::CompletedAt),
        ServiceOrderStatus::Delivered => Some(StatusTimestamp::DeliveredAt),
        _ => None,
    };

    StatusPatch {
        previous: current,
        status: target,
        stamp,
    }
}
