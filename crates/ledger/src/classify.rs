//! Classification of a record relative to a viewing account.

use ntt_auth::RoleHint;
use ntt_core::AccountId;

use crate::kind::TxKind;
use crate::record::TransactionRecord;

/// How a single record contributes to the totals of one viewpoint.
///
/// `received`/`sent` are viewpoint-relative; the remaining flags are global
/// and depend on the kind alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flow {
    pub received: bool,
    pub sent: bool,
    pub minted: bool,
    pub revoked: bool,
    /// Entity → admin refund without the revoke qualifier.
    pub returned: bool,
}

impl Flow {
    /// Whether the record touches the viewpoint at all.
    pub fn is_relevant(&self) -> bool {
        self.received || self.sent
    }
}

/// Classify `record` as seen by `viewpoint` acting as `role`.
///
/// A record is received when its kind delivers to the role the viewer plays
/// and the viewer is the recipient; sent when its kind draws from that role
/// and the viewer is the sender. Identifier comparison is case-insensitive by
/// construction of `AccountId`.
pub fn classify(record: &TransactionRecord, viewpoint: &AccountId, role: RoleHint) -> Flow {
    Flow {
        received: record.kind.recipient() == role && record.to == *viewpoint,
        sent: record.kind.sender() == role && record.from == *viewpoint,
        minted: record.kind == TxKind::AdminToEntity,
        revoked: record.kind.is_revoke(),
        returned: record.kind == TxKind::EntityToAdmin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntt_core::TokenAmount;

    fn account(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 20])
    }

    fn record(kind: TxKind, from: AccountId, to: AccountId) -> TransactionRecord {
        TransactionRecord::new(kind, from, to, TokenAmount::from(1u64), 1)
    }

    #[test]
    fn entity_receives_from_admin_and_users() {
        let (admin, entity, user) = (account(1), account(2), account(3));

        let mint = classify(&record(TxKind::AdminToEntity, admin, entity), &entity, RoleHint::Entity);
        assert!(mint.received && !mint.sent && mint.minted);

        let payment = classify(&record(TxKind::UserToEntity, user, entity), &entity, RoleHint::Entity);
        assert!(payment.received && !payment.sent);
    }

    #[test]
    fn entity_sends_to_users_and_admin() {
        let (admin, entity, user) = (account(1), account(2), account(3));

        for kind in [TxKind::EntityToUser, TxKind::EntityToAdmin, TxKind::EntityToAdminRevoke] {
            let to = if kind == TxKind::EntityToUser { user } else { admin };
            let flow = classify(&record(kind, entity, to), &entity, RoleHint::Entity);
            assert!(flow.sent && !flow.received, "{kind} should be sent by the entity");
        }
    }

    #[test]
    fn role_decides_which_side_counts() {
        let (entity, user) = (account(2), account(3));
        let payout = record(TxKind::EntityToUser, entity, user);

        assert!(classify(&payout, &user, RoleHint::User).received);
        // Same account viewed as an entity does not receive an entity→user payout.
        assert!(!classify(&payout, &user, RoleHint::Entity).is_relevant());
    }

    #[test]
    fn unrelated_viewpoint_only_sees_global_flags() {
        let (admin, entity) = (account(1), account(2));
        let revoke = classify(
            &record(TxKind::EntityToAdminRevoke, entity, admin),
            &account(9),
            RoleHint::Entity,
        );
        assert!(!revoke.is_relevant());
        assert!(revoke.revoked && !revoke.returned);

        let refund = classify(&record(TxKind::EntityToAdmin, entity, admin), &account(9), RoleHint::User);
        assert!(refund.returned && !refund.revoked);
    }

    #[test]
    fn admin_view_mirrors_mint_and_refunds() {
        let (admin, entity) = (account(1), account(2));
        let mint = classify(&record(TxKind::AdminToEntity, admin, entity), &admin, RoleHint::Admin);
        assert!(mint.sent && !mint.received);

        let revoke = classify(&record(TxKind::EntityToAdminRevoke, entity, admin), &admin, RoleHint::Admin);
        assert!(revoke.received);
    }
}
