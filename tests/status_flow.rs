use repair_shop_api::domain::{
    lead::{LeadStatus, LeadTransitionError, converted_order_for},
    status::{KANBAN_SEQUENCE, ServiceOrderStatus, StatusTimestamp, plan_transition},
};
use uuid::Uuid;

#[test]
fn each_milestone_stamps_its_timestamp() {
    use ServiceOrderStatus::*;

    let cases = [
        (AwaitingDevice, InAnalysis, Some(StatusTimestamp::ReceivedAt)),
        (InAnalysis, AwaitingApproval, None),
        (AwaitingApproval, InRepair, Some(StatusTimestamp::ApprovedAt)),
        (InRepair, Ready, Some(StatusTimestamp::CompletedAt)),
        (Ready, Delivered, Some(StatusTimestamp::DeliveredAt)),
        (InRepair, Cancelled, None),
    ];

    for (from, to, stamp) in cases {
        let patch = plan_transition(Some(from), to);
        assert_eq!(patch.previous, Some(from));
        assert_eq!(patch.status, to);
        assert_eq!(patch.stamp, stamp, "{from} -> {to}");
    }
}

#[test]
fn reentering_analysis_keeps_received_at() {
    let patch = plan_transition(
        Some(ServiceOrderStatus::InAnalysis),
        ServiceOrderStatus::InAnalysis,
    );
    assert_eq!(patch.stamp, None);
}

#[test]
fn any_status_can_be_targeted() {
    // backwards moves are allowed and still recorded
    let patch = plan_transition(Some(ServiceOrderStatus::Ready), ServiceOrderStatus::InAnalysis);
    assert_eq!(patch.stamp, Some(StatusTimestamp::ReceivedAt));
    assert_eq!(patch.previous, Some(ServiceOrderStatus::Ready));
}

#[test]
fn next_walks_the_board_in_order() {
    for pair in KANBAN_SEQUENCE.windows(2) {
        assert_eq!(pair[0].next(), Some(pair[1]));
    }
    assert_eq!(ServiceOrderStatus::Delivered.next(), None);
    assert_eq!(ServiceOrderStatus::Cancelled.next(), None);
    assert_eq!(ServiceOrderStatus::Lead.next(), None);
}

#[test]
fn statuses_round_trip_through_their_column_text() {
    for status in ServiceOrderStatus::ALL {
        let parsed: ServiceOrderStatus = status.as_str().parse().expect("known status");
        assert_eq!(&parsed, status);
    }
    assert!("shipped".parse::<ServiceOrderStatus>().is_err());
}

#[test]
fn converted_lead_requires_an_order() {
    let order = Uuid::new_v4();

    assert_eq!(
        converted_order_for(LeadStatus::Converted, Some(order)),
        Ok(Some(order))
    );
    assert_eq!(
        converted_order_for(LeadStatus::Converted, None),
        Err(LeadTransitionError::MissingConvertedOrder)
    );
}

#[test]
fn other_lead_statuses_clear_the_order_link() {
    let order = Uuid::new_v4();
    for status in [LeadStatus::Contacted, LeadStatus::Rejected, LeadStatus::Pending] {
        assert_eq!(converted_order_for(status, Some(order)), Ok(None));
    }
}
