use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc, Weekday};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Active,
    Archived,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DayHours {
    pub open: bool,
    pub opens: Option<String>,
    pub closes: Option<String>,
}

impl DayHours {
    pub fn window(opens: &str, closes: &str) -> Self {
        Self {
            open: true,
            opens: Some(opens.to_string()),
            closes: Some(closes.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeeklyHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl WeeklyHours {
    /// Mon-Fri 09:00-19:00, Sat 09:00-14:00, closed Sunday. Seeded on the
    /// first location of a new tenant.
    pub fn default_business_week() -> Self {
        Self {
            monday: DayHours::window("09:00", "19:00"),
            tuesday: DayHours::window("09:00", "19:00"),
            wednesday: DayHours::window("09:00", "19:00"),
            thursday: DayHours::window("09:00", "19:00"),
            friday: DayHours::window("09:00", "19:00"),
            saturday: DayHours::window("09:00", "14:00"),
            sunday: DayHours::default(),
        }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Location {
    pub id: String,
    pub tenant_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub schedule_json: String,
    pub status: LocationStatus,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(tenant_id: String, name: String, schedule: &WeeklyHours) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            name,
            address: None,
            phone: None,
            email: None,
            schedule_json: serde_json::to_string(schedule).unwrap_or_else(|_| "{}".to_string()),
            status: LocationStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn schedule(&self) -> WeeklyHours {
        serde_json::from_str(&self.schedule_json).unwrap_or_default()
    }
}
