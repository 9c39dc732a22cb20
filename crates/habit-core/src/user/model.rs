//! User domain model.

use serde::{Deserialize, Serialize};

use crate::goal::Goal;

/// The signed-in user as returned by `GET users/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    /// Goals owned by the user, in server order
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl User {
    /// Finds one of the user's goals by ID.
    pub fn goal(&self, goal_id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == goal_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_with_goals() {
        let json = r#"{
            "_id": "u1",
            "username": "reader",
            "email": "reader@example.com",
            "goals": [{
                "_id": "g1",
                "name": "Read 12 books",
                "minTimeLine": "2024-01-01T00:00:00Z",
                "maxTimeLine": "2024-12-31T00:00:00Z",
                "completed": true
            }]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "reader");
        assert_eq!(user.goals.len(), 1);
        assert!(user.goal("g1").unwrap().completed);
        assert!(user.goal("missing").is_none());
    }

    #[test]
    fn test_user_without_goals() {
        let user: User =
            serde_json::from_str(r#"{"_id":"u2","username":"new","email":"n@example.com"}"#).unwrap();
        assert!(user.goals.is_empty());
    }
}
