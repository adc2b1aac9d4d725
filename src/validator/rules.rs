use super::{Finding, FindingCategory, GraphRule, Severity};
use crate::catalog::{BlockCatalog, BlockCategory};
use crate::graph::Canvas;

/// More data blocks than this in one canvas is reported as heavy store usage.
pub const HEAVY_DATA_THRESHOLD: usize = 5;

/// The block type that counts as a permission check for moderation actions.
pub const PERMISSION_CHECK_BLOCK: &str = "condition_has_permission";

/// A non-trigger block nothing connects into.
pub struct OrphanedBlockRule;

impl GraphRule for OrphanedBlockRule {
    fn rule_id(&self) -> &'static str {
        "orphaned-block"
    }

    fn check(&self, canvas: &Canvas, _catalog: &BlockCatalog) -> Vec<Finding> {
        canvas
            .actions()
            .filter(|block| !canvas.has_inbound(&block.id))
            .map(|block| {
                Finding::new(
                    self.rule_id(),
                    "Orphaned block",
                    format!(
                        "Block '{}' ({}) has no incoming connection and is not reachable from a trigger.",
                        block.id, block.block_type
                    ),
                    FindingCategory::Logic,
                    Severity::High,
                )
                .affecting([block.id.as_str()])
                .with_fix("Connect the block to a trigger or remove it.")
            })
            .collect()
    }
}

/// A trigger with nothing connected after it.
pub struct DeadEndTriggerRule;

impl GraphRule for DeadEndTriggerRule {
    fn rule_id(&self) -> &'static str {
        "dead-end-trigger"
    }

    fn check(&self, canvas: &Canvas, _catalog: &BlockCatalog) -> Vec<Finding> {
        canvas
            .triggers()
            .filter(|block| !canvas.has_outbound(&block.id))
            .map(|block| {
                Finding::new(
                    self.rule_id(),
                    "Trigger leads nowhere",
                    format!(
                        "Trigger '{}' ({}) has no outgoing connection, so it does nothing.",
                        block.id, block.block_type
                    ),
                    FindingCategory::Logic,
                    Severity::Medium,
                )
                .affecting([block.id.as_str()])
                .with_fix("Connect an action to the trigger.")
            })
            .collect()
    }
}

/// A connection whose source and target are the same block.
pub struct SelfLoopRule;

impl GraphRule for SelfLoopRule {
    fn rule_id(&self) -> &'static str {
        "infinite-loop-self"
    }

    fn check(&self, canvas: &Canvas, _catalog: &BlockCatalog) -> Vec<Finding> {
        canvas
            .connections
            .iter()
            .filter(|conn| conn.is_self_loop())
            .map(|conn| {
                Finding::new(
                    self.rule_id(),
                    "Block connected to itself",
                    format!(
                        "Connection '{}' loops block '{}' back into itself.",
                        conn.id, conn.source
                    ),
                    FindingCategory::Optimization,
                    Severity::Critical,
                )
                .affecting([conn.source.as_str()])
                .with_fix("Remove the self-referencing connection.")
            })
            .collect()
    }
}

/// Moderation actions on a canvas without any permission check.
pub struct MissingPermissionCheckRule;

impl GraphRule for MissingPermissionCheckRule {
    fn rule_id(&self) -> &'static str {
        "missing-perm-check"
    }

    fn check(&self, canvas: &Canvas, catalog: &BlockCatalog) -> Vec<Finding> {
        let moderation: Vec<&str> = canvas
            .blocks
            .iter()
            .filter(|block| catalog.category_of(block) == BlockCategory::Moderation)
            .map(|block| block.id.as_str())
            .collect();
        let has_check = canvas
            .blocks
            .iter()
            .any(|block| block.block_type == PERMISSION_CHECK_BLOCK);

        if moderation.is_empty() || has_check {
            return Vec::new();
        }

        vec![
            Finding::new(
                self.rule_id(),
                "Moderation without permission check",
                format!(
                    "{} moderation block(s) can be run by any member because no permission check exists.",
                    moderation.len()
                ),
                FindingCategory::Security,
                Severity::Critical,
            )
            .affecting(moderation)
            .with_fix("Place a 'Has Permission' condition before the moderation actions."),
        ]
    }
}

/// A reply visible to the whole channel.
pub struct PublicReplyRule;

impl GraphRule for PublicReplyRule {
    fn rule_id(&self) -> &'static str {
        "public-reply"
    }

    fn check(&self, canvas: &Canvas, catalog: &BlockCatalog) -> Vec<Finding> {
        canvas
            .blocks
            .iter()
            .filter(|block| block.block_type == "action_reply")
            .filter(|block| !catalog.resolve_bool(block, "ephemeral"))
            .map(|block| {
                Finding::new(
                    self.rule_id(),
                    "Public reply",
                    format!("Reply '{}' is visible to everyone in the channel.", block.id),
                    FindingCategory::Style,
                    Severity::Low,
                )
                .affecting([block.id.as_str()])
                .with_fix("Enable 'Only visible to the user' for replies meant for one member.")
            })
            .collect()
    }
}

/// A send-message block pinned to a numeric channel id.
pub struct HardcodedChannelIdRule;

impl GraphRule for HardcodedChannelIdRule {
    fn rule_id(&self) -> &'static str {
        "hardcoded-channel-id"
    }

    fn check(&self, canvas: &Canvas, catalog: &BlockCatalog) -> Vec<Finding> {
        canvas
            .blocks
            .iter()
            .filter(|block| block.block_type == "action_send_message")
            .filter(|block| is_numeric_id(&catalog.resolve_str(block, "channel_id")))
            .map(|block| {
                Finding::new(
                    self.rule_id(),
                    "Hard-coded channel ID",
                    format!(
                        "Block '{}' sends to a fixed channel ID, which breaks when the bot joins another server.",
                        block.id
                    ),
                    FindingCategory::Optimization,
                    Severity::Medium,
                )
                .affecting([block.id.as_str()])
                .with_fix("Leave the channel empty to reply in the current channel, or make it configurable.")
            })
            .collect()
    }
}

fn is_numeric_id(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Many data-store blocks on one canvas.
pub struct HeavyDataUsageRule;

impl GraphRule for HeavyDataUsageRule {
    fn rule_id(&self) -> &'static str {
        "heavy-db-usage"
    }

    fn check(&self, canvas: &Canvas, catalog: &BlockCatalog) -> Vec<Finding> {
        let count = canvas
            .blocks
            .iter()
            .filter(|block| catalog.category_of(block) == BlockCategory::Data)
            .count();
        if count <= HEAVY_DATA_THRESHOLD {
            return Vec::new();
        }

        vec![
            Finding::new(
                self.rule_id(),
                "Heavy data usage",
                format!(
                    "{} data blocks run on this canvas. Frequent store access slows handlers down.",
                    count
                ),
                FindingCategory::Optimization,
                Severity::Medium,
            )
            .with_fix("Combine reads and writes, or cache values in a single variable."),
        ]
    }
}

/// Registers the built-in rules in their reporting order.
pub(super) fn register_default_rules(rules: &mut Vec<Box<dyn GraphRule>>) {
    rules.push(Box::new(OrphanedBlockRule));
    rules.push(Box::new(DeadEndTriggerRule));
    rules.push(Box::new(SelfLoopRule));
    rules.push(Box::new(MissingPermissionCheckRule));
    rules.push(Box::new(PublicReplyRule));
    rules.push(Box::new(HardcodedChannelIdRule));
    rules.push(Box::new(HeavyDataUsageRule));
}
