use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    Athlete,
}

impl Activity {
    /// TDEE-faktor
    pub fn factor(self) -> f64 {
        match self {
            Activity::Sedentary => 1.2,
            Activity::Light => 1.375,
            Activity::Moderate => 1.55,
            Activity::Active => 1.725,
            Activity::Athlete => 1.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub sex: Sex,
    pub age: u32,
    pub height_in: f64,
    #[serde(default)]
    pub activity: Activity,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            age: 30,
            height_in: 70.0,
            activity: Activity::Moderate,
        }
    }
}

/// Én veiing. `date` er nøkkel: maks én per kalenderdag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub date: NaiveDate,
    pub weight_lb: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, weight_lb: f64) -> Self {
        Self { date, weight_lb }
    }
}

/// Omkrets-felter (tommer). Rekkefølgen følger skjemaet i UI-et.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureKey {
    #[serde(rename = "chestIn")]
    Chest,
    #[serde(rename = "waistIn")]
    Waist,
    #[serde(rename = "hipsIn")]
    Hips,
    #[serde(rename = "shouldersIn")]
    Shoulders,
    #[serde(rename = "neckIn")]
    Neck,
    #[serde(rename = "bicepsLIn")]
    BicepsL,
    #[serde(rename = "bicepsRIn")]
    BicepsR,
    #[serde(rename = "forearmLIn")]
    ForearmL,
    #[serde(rename = "forearmRIn")]
    ForearmR,
    #[serde(rename = "thighLIn")]
    ThighL,
    #[serde(rename = "thighRIn")]
    ThighR,
    #[serde(rename = "calfLIn")]
    CalfL,
    #[serde(rename = "calfRIn")]
    CalfR,
}

impl MeasureKey {
    pub const ALL: [MeasureKey; 13] = [
        MeasureKey::Chest,
        MeasureKey::Waist,
        MeasureKey::Hips,
        MeasureKey::Shoulders,
        MeasureKey::Neck,
        MeasureKey::BicepsL,
        MeasureKey::BicepsR,
        MeasureKey::ForearmL,
        MeasureKey::ForearmR,
        MeasureKey::ThighL,
        MeasureKey::ThighR,
        MeasureKey::CalfL,
        MeasureKey::CalfR,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MeasureKey::Chest => "Chest",
            MeasureKey::Waist => "Waist",
            MeasureKey::Hips => "Hips",
            MeasureKey::Shoulders => "Shoulders",
            MeasureKey::Neck => "Neck",
            MeasureKey::BicepsL => "Biceps L",
            MeasureKey::BicepsR => "Biceps R",
            MeasureKey::ForearmL => "Forearm L",
            MeasureKey::ForearmR => "Forearm R",
            MeasureKey::ThighL => "Thigh L",
            MeasureKey::ThighR => "Thigh R",
            MeasureKey::CalfL => "Calf L",
            MeasureKey::CalfR => "Calf R",
        }
    }
}

/// Én måledag. Alle felt valgfrie, i tommer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSample {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulders_in: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck_in: Option<f64>,
    #[serde(default, rename = "bicepsLIn", skip_serializing_if = "Option::is_none")]
    pub biceps_l_in: Option<f64>,
    #[serde(default, rename = "bicepsRIn", skip_serializing_if = "Option::is_none")]
    pub biceps_r_in: Option<f64>,
    #[serde(default, rename = "forearmLIn", skip_serializing_if = "Option::is_none")]
    pub forearm_l_in: Option<f64>,
    #[serde(default, rename = "forearmRIn", skip_serializing_if = "Option::is_none")]
    pub forearm_r_in: Option<f64>,
    #[serde(default, rename = "thighLIn", skip_serializing_if = "Option::is_none")]
    pub thigh_l_in: Option<f64>,
    #[serde(default, rename = "thighRIn", skip_serializing_if = "Option::is_none")]
    pub thigh_r_in: Option<f64>,
    #[serde(default, rename = "calfLIn", skip_serializing_if = "Option::is_none")]
    pub calf_l_in: Option<f64>,
    #[serde(default, rename = "calfRIn", skip_serializing_if = "Option::is_none")]
    pub calf_r_in: Option<f64>,
}

impl MeasurementSample {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            chest_in: None,
            waist_in: None,
            hips_in: None,
            shoulders_in: None,
            neck_in: None,
            biceps_l_in: None,
            biceps_r_in: None,
            forearm_l_in: None,
            forearm_r_in: None,
            thigh_l_in: None,
            thigh_r_in: None,
            calf_l_in: None,
            calf_r_in: None,
        }
    }

    fn slot(&self, key: MeasureKey) -> &Option<f64> {
        match key {
            MeasureKey::Chest => &self.chest_in,
            MeasureKey::Waist => &self.waist_in,
            MeasureKey::Hips => &self.hips_in,
            MeasureKey::Shoulders => &self.shoulders_in,
            MeasureKey::Neck => &self.neck_in,
            MeasureKey::BicepsL => &self.biceps_l_in,
            MeasureKey::BicepsR => &self.biceps_r_in,
            MeasureKey::ForearmL => &self.forearm_l_in,
            MeasureKey::ForearmR => &self.forearm_r_in,
            MeasureKey::ThighL => &self.thigh_l_in,
            MeasureKey::ThighR => &self.thigh_r_in,
            MeasureKey::CalfL => &self.calf_l_in,
            MeasureKey::CalfR => &self.calf_r_in,
        }
    }

    fn slot_mut(&mut self, key: MeasureKey) -> &mut Option<f64> {
        match key {
            MeasureKey::Chest => &mut self.chest_in,
            MeasureKey::Waist => &mut self.waist_in,
            MeasureKey::Hips => &mut self.hips_in,
            MeasureKey::Shoulders => &mut self.shoulders_in,
            MeasureKey::Neck => &mut self.neck_in,
            MeasureKey::BicepsL => &mut self.biceps_l_in,
            MeasureKey::BicepsR => &mut self.biceps_r_in,
            MeasureKey::ForearmL => &mut self.forearm_l_in,
            MeasureKey::ForearmR => &mut self.forearm_r_in,
            MeasureKey::ThighL => &mut self.thigh_l_in,
            MeasureKey::ThighR => &mut self.thigh_r_in,
            MeasureKey::CalfL => &mut self.calf_l_in,
            MeasureKey::CalfR => &mut self.calf_r_in,
        }
    }

    pub fn get(&self, key: MeasureKey) -> Option<f64> {
        *self.slot(key)
    }

    pub fn set(&mut self, key: MeasureKey, inches: Option<f64>) {
        *self.slot_mut(key) = inches;
    }

    pub fn with(mut self, key: MeasureKey, inches: f64) -> Self {
        self.set(key, Some(inches));
        self
    }

    /// Felt satt i `patch` overskriver, øvrige beholdes. Datoen beholdes.
    pub fn merged_with(&self, patch: &MeasurementSample) -> MeasurementSample {
        let mut out = *self;
        for key in MeasureKey::ALL {
            if let Some(v) = patch.get(key) {
                out.set(key, Some(v));
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        MeasureKey::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

/// Hele det persisterte dokumentet (profil + veiinger + målinger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DocumentRepr")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub start_weight_lb: f64,
    pub target_weight_lb: f64,
    pub entries: Vec<Sample>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<MeasurementSample>,
}

/// Snapshot slik det ligger på disk. Dashbordet skriver `goalWeightLb`,
/// innstillingene `targetWeightLb`, ofte begge i samme objekt.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRepr {
    #[serde(default)]
    name: Option<String>,
    profile: Profile,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    target_date: Option<NaiveDate>,
    start_weight_lb: f64,
    #[serde(default)]
    target_weight_lb: Option<f64>,
    #[serde(default)]
    goal_weight_lb: Option<f64>,
    #[serde(default)]
    entries: Vec<Sample>,
    #[serde(default)]
    measures: Vec<MeasurementSample>,
}

impl From<DocumentRepr> for Document {
    fn from(r: DocumentRepr) -> Self {
        // targetWeightLb vinner; goalWeightLb er reserve
        let target_weight_lb = r
            .target_weight_lb
            .or(r.goal_weight_lb)
            .unwrap_or(Document::DEFAULT_TARGET_LB);
        Self {
            name: r.name,
            profile: r.profile,
            start_date: r.start_date,
            target_date: r.target_date,
            start_weight_lb: r.start_weight_lb,
            target_weight_lb,
            entries: r.entries,
            measures: r.measures,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            name: None,
            profile: Profile::default(),
            start_date: None,
            target_date: None,
            start_weight_lb: Self::DEFAULT_START_LB,
            target_weight_lb: Self::DEFAULT_TARGET_LB,
            entries: Vec::new(),
            measures: Vec::new(),
        }
    }
}

impl Document {
    pub const DEFAULT_START_LB: f64 = 200.0;
    pub const DEFAULT_TARGET_LB: f64 = 170.0;

    /// Nyeste veiing (etter dato), ellers startvekt.
    pub fn latest_weight_lb(&self) -> f64 {
        self.entries
            .iter()
            .max_by_key(|s| s.date)
            .map(|s| s.weight_lb)
            .unwrap_or(self.start_weight_lb)
    }
}
