mod common;

use chrono::{Days, NaiveDate};
use common::FakeService;
use habit_application::{GoalTaskCoordinator, HabitApi, TaskPanel};
use habit_core::task::Frequency;
use habit_core::validation::{GoalForm, TaskForm};

#[tokio::test]
async fn test_goal_task_lifecycle() {
    let service = FakeService::new();
    let coordinator = GoalTaskCoordinator::new(HabitApi::new(service.clone()));
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    coordinator.load_user().await.unwrap();
    assert!(coordinator.goals().await.is_empty());

    let form = GoalForm::new("Read 12 books", Some(today), today.checked_add_days(Days::new(30)));
    coordinator.create_goal(&form, today).await.unwrap();

    let goals = coordinator.goals().await;
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "Read 12 books");
    assert!(!goals[0].completed);

    coordinator.select_goal(goals[0].clone()).await.unwrap();
    assert!(matches!(coordinator.task_panel().await, TaskPanel::Empty { .. }));

    coordinator
        .create_task(&TaskForm::new("Read 1 book", "1", "once a week"))
        .await
        .unwrap();

    let panel = coordinator.task_panel().await;
    assert_eq!(panel.tasks().len(), 1);
    let task = panel.tasks()[0].clone();
    assert_eq!(task.name, "Read 1 book");
    assert_eq!(task.frequency, Frequency::OnceAWeek);
    assert!(!task.completed);

    let user_loads = service.count("GET users/me");
    coordinator.toggle_task(&task.id, true).await.unwrap();

    assert_eq!(service.count("GET users/me"), user_loads + 1);
    assert!(coordinator.task_panel().await.tasks()[0].completed);
    // goal completion is whatever the server reports
    assert!(coordinator.goals().await[0].completed);
    assert!(coordinator.selected_goal().await.unwrap().completed);

    coordinator.delete_task(&task.id).await.unwrap();
    assert!(matches!(coordinator.task_panel().await, TaskPanel::Empty { .. }));

    let goal_id = goals[0].id.clone();
    coordinator.delete_goal(&goal_id).await.unwrap();
    let view = coordinator.snapshot().await;
    assert_eq!(view.panel, TaskPanel::NoSelection);
    assert!(view.goals().is_empty());
}
