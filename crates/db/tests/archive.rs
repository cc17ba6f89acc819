//! Integration tests for archive, unarchive, and purge behaviour.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Archived entities are hidden from `find_by_id` and list queries
//! - Unarchiving an entity makes it visible again
//! - Parent and child archive flags are independent
//! - Purge removes only archived rows, and refuses parents with live children
//! - Archiving is idempotent (second call returns `false`)

use moim_db::models::goal::CreateGoal;
use moim_db::models::project::CreateProject;
use moim_db::models::task::CreateTask;
use moim_db::repositories::archive_repo::{is_known_entity_type, PurgeOutcome};
use moim_db::repositories::{ArchiveRepo, GoalRepo, ProjectRepo, TaskRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str, code: &str) -> CreateProject {
    CreateProject {
        workspace_id: None,
        name: name.to_string(),
        code: code.to_string(),
        description: Some("archive test".to_string()),
        deadline: None,
        labels: vec![],
        owner_ids: vec![],
    }
}

fn new_goal(project_id: i64, title: &str) -> CreateGoal {
    CreateGoal {
        project_id,
        title: title.to_string(),
        description: None,
        deadline: None,
        labels: vec![],
        assignee_ids: vec![],
    }
}

fn new_task(project_id: i64, goal_id: Option<i64>, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        goal_id,
        title: title.to_string(),
        description: None,
        priority: None,
        deadline: None,
        duration_hours: None,
        progress: 0,
        assignee_ids: vec![],
    }
}

// ---------------------------------------------------------------------------
// Archive hides entities from normal reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn archive_hides_project_from_find_and_list(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("숨김 프로젝트", "HID-1"), None)
        .await
        .unwrap();

    let archived = ProjectRepo::archive(&pool, project.id).await.unwrap();
    assert!(archived, "archive should return true on first call");

    let found = ProjectRepo::find_by_id(&pool, project.id).await.unwrap();
    assert!(found.is_none(), "archived project must be hidden");

    let listed = ProjectRepo::list(&pool).await.unwrap();
    assert!(listed.iter().all(|p| p.id != project.id));

    // Still reachable when archived rows are included.
    let raw = ProjectRepo::find_by_id_include_archived(&pool, project.id)
        .await
        .unwrap();
    assert!(raw.is_some());
    assert!(raw.unwrap().archived_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn archive_is_idempotent(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("한번만", "ONC-1"), None)
        .await
        .unwrap();

    assert!(ProjectRepo::archive(&pool, project.id).await.unwrap());
    assert!(
        !ProjectRepo::archive(&pool, project.id).await.unwrap(),
        "second archive call must be a no-op"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unarchive_restores_visibility(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("복원", "RST-1"), None)
        .await
        .unwrap();
    ProjectRepo::archive(&pool, project.id).await.unwrap();

    let restored = ProjectRepo::unarchive(&pool, project.id).await.unwrap();
    assert!(restored);

    let found = ProjectRepo::find_by_id(&pool, project.id).await.unwrap();
    assert!(found.is_some(), "unarchived project must be visible again");

    // Unarchiving a live row is a no-op.
    assert!(!ProjectRepo::unarchive(&pool, project.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Parent and child archive flags are independent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn task_archive_does_not_touch_parent_goal(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("독립", "IND-1"), None)
        .await
        .unwrap();
    let goal = GoalRepo::create(&pool, &new_goal(project.id, "목표"), None)
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, Some(goal.id), "할일"), "진행전", None)
        .await
        .unwrap();

    TaskRepo::archive(&pool, task.id).await.unwrap();

    let goal_after = GoalRepo::find_by_id(&pool, goal.id).await.unwrap();
    assert!(goal_after.is_some(), "goal must stay live");
    assert!(goal_after.unwrap().archived_at.is_none());

    let raw_task = TaskRepo::find_by_id_include_archived(&pool, task.id)
        .await
        .unwrap()
        .unwrap();
    assert!(raw_task.archived_at.is_some());

    // And the other way round: archiving the goal leaves the (already
    // archived) task's own flag untouched.
    GoalRepo::archive(&pool, goal.id).await.unwrap();
    TaskRepo::unarchive(&pool, task.id).await.unwrap();
    let task_after = TaskRepo::find_by_id(&pool, task.id).await.unwrap();
    assert!(task_after.is_some(), "task restore is independent of goal");

    let raw_goal = GoalRepo::find_by_id_include_archived(&pool, goal.id)
        .await
        .unwrap()
        .unwrap();
    assert!(raw_goal.archived_at.is_some(), "goal stays archived");
}

// ---------------------------------------------------------------------------
// Unified archive listing and purge
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn archive_listing_groups_by_entity_type(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("보관함", "ARC-1"), None)
        .await
        .unwrap();
    let goal = GoalRepo::create(&pool, &new_goal(project.id, "보관 목표"), None)
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, Some(goal.id), "보관 할일"), "진행전", None)
        .await
        .unwrap();

    GoalRepo::archive(&pool, goal.id).await.unwrap();
    TaskRepo::archive(&pool, task.id).await.unwrap();

    let summary = ArchiveRepo::list_archived(&pool, None).await.unwrap();
    assert!(summary.projects.is_empty());
    assert_eq!(summary.goals.len(), 1);
    assert_eq!(summary.tasks.len(), 1);

    // Type filter returns only that type.
    let only_tasks = ArchiveRepo::list_archived(&pool, Some("tasks")).await.unwrap();
    assert!(only_tasks.goals.is_empty());
    assert_eq!(only_tasks.tasks.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_one_refuses_live_rows(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("살아있음", "LIV-1"), None)
        .await
        .unwrap();

    let outcome = ArchiveRepo::purge_one(&pool, "projects", project.id)
        .await
        .unwrap();
    assert_eq!(outcome, PurgeOutcome::NotFound, "live rows must never be purged");

    ProjectRepo::archive(&pool, project.id).await.unwrap();
    let outcome = ArchiveRepo::purge_one(&pool, "projects", project.id)
        .await
        .unwrap();
    assert_eq!(outcome, PurgeOutcome::Purged);

    let gone = ProjectRepo::find_by_id_include_archived(&pool, project.id)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_blocks_archived_parent_with_live_children(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("보호됨", "PRT-1"), None)
        .await
        .unwrap();
    let goal = GoalRepo::create(&pool, &new_goal(project.id, "살아있는 목표"), None)
        .await
        .unwrap();
    let task = TaskRepo::create(&pool, &new_task(project.id, Some(goal.id), "살아있는 할일"), "진행전", None)
        .await
        .unwrap();

    ProjectRepo::archive(&pool, project.id).await.unwrap();
    GoalRepo::archive(&pool, goal.id).await.unwrap();

    // The goal still holds a live task; purging it must be refused, and the
    // task must survive.
    let outcome = ArchiveRepo::purge_one(&pool, "goals", goal.id).await.unwrap();
    assert_eq!(outcome, PurgeOutcome::Blocked);
    assert!(TaskRepo::find_by_id(&pool, task.id).await.unwrap().is_some());

    // Same for the project, which holds the live task transitively.
    let outcome = ArchiveRepo::purge_one(&pool, "projects", project.id)
        .await
        .unwrap();
    assert_eq!(outcome, PurgeOutcome::Blocked);

    // Purge-all and its preview skip the blocked parents too.
    let preview = ArchiveRepo::purge_preview(&pool).await.unwrap();
    assert_eq!(preview.projects, 0);
    assert_eq!(preview.goals, 0);
    assert_eq!(preview.tasks, 0);

    ArchiveRepo::purge_all(&pool).await.unwrap();
    assert!(TaskRepo::find_by_id(&pool, task.id).await.unwrap().is_some());
    let raw_goal = GoalRepo::find_by_id_include_archived(&pool, goal.id)
        .await
        .unwrap();
    assert!(raw_goal.is_some(), "blocked goal must survive purge-all");

    // Once the task is archived the whole chain becomes eligible.
    TaskRepo::archive(&pool, task.id).await.unwrap();
    let outcome = ArchiveRepo::purge_one(&pool, "projects", project.id)
        .await
        .unwrap();
    assert_eq!(outcome, PurgeOutcome::Purged);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_all_clears_archived_hierarchy(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("전체삭제", "PRG-1"), None)
        .await
        .unwrap();
    let goal = GoalRepo::create(&pool, &new_goal(project.id, "목표"), None)
        .await
        .unwrap();
    TaskRepo::create(&pool, &new_task(project.id, Some(goal.id), "할일"), "진행전", None)
        .await
        .unwrap();

    // Archive the whole hierarchy, then purge.
    let summary_before = ArchiveRepo::purge_preview(&pool).await.unwrap();
    assert_eq!(summary_before.projects, 0);

    ProjectRepo::archive(&pool, project.id).await.unwrap();
    GoalRepo::archive(&pool, goal.id).await.unwrap();
    sqlx::query("UPDATE tasks SET archived_at = NOW()")
        .execute(&pool)
        .await
        .unwrap();

    let preview = ArchiveRepo::purge_preview(&pool).await.unwrap();
    assert_eq!(preview.projects, 1);
    assert_eq!(preview.goals, 1);
    assert_eq!(preview.tasks, 1);

    ArchiveRepo::purge_all(&pool).await.unwrap();

    let after = ArchiveRepo::purge_preview(&pool).await.unwrap();
    assert_eq!(after.projects + after.goals + after.tasks, 0);
}

#[test]
fn entity_type_validation() {
    assert!(is_known_entity_type("projects"));
    assert!(is_known_entity_type("goals"));
    assert!(is_known_entity_type("tasks"));
    assert!(!is_known_entity_type("meetings"));
    assert!(!is_known_entity_type(""));
}
