//! WordPress core data cleanup. Every target here is a core table, so no rule
//! is probed; a missing commentmeta or options table surfaces as a failed rule.

use super::rules::{like_predicate, like_prefix, placeholders};
use super::{Category, CategoryReport, CleanupContext, CleanupRule, Effect, MaintenanceTarget, RuleId, RuleRunner};
use crate::constants::markers;
use crate::database::BindValue;

pub fn rules(ctx: &CleanupContext<'_>) -> Vec<CleanupRule> {
    let t = ctx.tables;
    let statuses = markers::DISCARDED_COMMENT_STATES;

    vec![
        CleanupRule {
            id: RuleId::ExpiredTransients,
            category: Category::Platform,
            table: t.options.clone(),
            targets: vec![MaintenanceTarget::required_table(&t.options)],
            effect: Effect::Delete {
                predicate: like_predicate("option_name"),
                binds: vec![BindValue::Text(like_prefix(markers::TRANSIENT_PREFIX))],
            },
        },
        CleanupRule {
            id: RuleId::OrphanedPostmeta,
            category: Category::Platform,
            table: t.postmeta.clone(),
            targets: vec![
                MaintenanceTarget::required_table(&t.postmeta),
                MaintenanceTarget::required_table(&t.posts),
            ],
            effect: Effect::Delete {
                predicate: format!(
                    "NOT EXISTS (SELECT 1 FROM {posts} WHERE {posts}.ID = {meta}.post_id)",
                    posts = ctx.quote(&t.posts),
                    meta = ctx.quote(&t.postmeta),
                ),
                binds: Vec::new(),
            },
        },
        CleanupRule {
            id: RuleId::PostRevisions,
            category: Category::Platform,
            table: t.posts.clone(),
            targets: vec![MaintenanceTarget::required_table(&t.posts)],
            effect: Effect::Delete {
                predicate: "post_type = ?".to_string(),
                binds: vec![BindValue::Text(markers::REVISION_POST_TYPE.to_string())],
            },
        },
        CleanupRule {
            id: RuleId::SpamTrashComments,
            category: Category::Platform,
            table: t.comments.clone(),
            targets: vec![MaintenanceTarget::required_table(&t.comments)],
            effect: Effect::Delete {
                predicate: format!("comment_approved IN ({})", placeholders(statuses.len())),
                binds: statuses
                    .iter()
                    .map(|s| BindValue::Text(s.to_string()))
                    .collect(),
            },
        },
        CleanupRule {
            id: RuleId::OrphanedCommentmeta,
            category: Category::Platform,
            table: t.commentmeta.clone(),
            targets: vec![
                MaintenanceTarget::required_table(&t.commentmeta),
                MaintenanceTarget::required_table(&t.comments),
            ],
            effect: Effect::Delete {
                predicate: format!(
                    "NOT EXISTS (SELECT 1 FROM {comments} WHERE {comments}.comment_ID = {meta}.comment_id)",
                    comments = ctx.quote(&t.comments),
                    meta = ctx.quote(&t.commentmeta),
                ),
                binds: Vec::new(),
            },
        },
    ]
}

pub async fn run(runner: &RuleRunner<'_>, ctx: &CleanupContext<'_>) -> CategoryReport {
    runner.run_category(Category::Platform, &rules(ctx)).await
}
