/// Patrol shown for rows whose line item carried no patrol
pub const DEFAULT_PATROL: &str = "Rocking Chair";

/// Header row shared by the CSV and spreadsheet outputs
pub const REPORT_HEADERS: [&str; 10] = [
    "Order ID",
    "Total Money",
    "Line Item Name",
    "Name",
    "Rank",
    "Patrol",
    "Emergency Contact",
    "Emergency Contact Phone",
    "Cell Phone",
    "Travel to Campout",
];

/// Output columns a resolved field key can land in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    ScoutName,
    ScouterName,
    Rank,
    Patrol,
    EmergencyContact,
    EmergencyContactPhone,
    CellPhone,
    TravelToCampout,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::ScoutName,
        Column::ScouterName,
        Column::Rank,
        Column::Patrol,
        Column::EmergencyContact,
        Column::EmergencyContactPhone,
        Column::CellPhone,
        Column::TravelToCampout,
    ];

    /// Map a catalog-authored field key to its column.
    ///
    /// Exact, case-sensitive match: any wording drift in the catalog
    /// ("Cell Phone Number", trailing spaces) drops the field.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Scout Name" => Some(Column::ScoutName),
            "Scouter Name" => Some(Column::ScouterName),
            "Rank" => Some(Column::Rank),
            "Patrol" => Some(Column::Patrol),
            "Emergency Contact" => Some(Column::EmergencyContact),
            "Emergency Contact Phone Number" => Some(Column::EmergencyContactPhone),
            "Cell phone number" => Some(Column::CellPhone),
            "Will you travel with the troop to the campout?" => Some(Column::TravelToCampout),
            _ => None,
        }
    }
}

/// One report row per (order, line item). Every field defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    pub order_id: String,
    pub total_money: String,
    pub line_item_name: String,
    pub scout_name: String,
    pub scouter_name: String,
    pub rank: String,
    pub patrol: String,
    pub emergency_contact: String,
    pub emergency_contact_phone: String,
    pub cell_phone: String,
    pub travel_to_campout: String,
}

impl OutputRow {
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::ScoutName => &self.scout_name,
            Column::ScouterName => &self.scouter_name,
            Column::Rank => &self.rank,
            Column::Patrol => &self.patrol,
            Column::EmergencyContact => &self.emergency_contact,
            Column::EmergencyContactPhone => &self.emergency_contact_phone,
            Column::CellPhone => &self.cell_phone,
            Column::TravelToCampout => &self.travel_to_campout,
        }
    }

    /// Set a column, replacing any earlier value
    pub fn set(&mut self, column: Column, value: String) {
        let slot = match column {
            Column::ScoutName => &mut self.scout_name,
            Column::ScouterName => &mut self.scouter_name,
            Column::Rank => &mut self.rank,
            Column::Patrol => &mut self.patrol,
            Column::EmergencyContact => &mut self.emergency_contact,
            Column::EmergencyContactPhone => &mut self.emergency_contact_phone,
            Column::CellPhone => &mut self.cell_phone,
            Column::TravelToCampout => &mut self.travel_to_campout,
        };
        *slot = value;
    }

    /// Scout name if present, otherwise the scouter name
    pub fn display_name(&self) -> &str {
        if !self.scout_name.is_empty() {
            &self.scout_name
        } else {
            &self.scouter_name
        }
    }

    pub fn display_patrol(&self) -> &str {
        if self.patrol.is_empty() {
            DEFAULT_PATROL
        } else {
            &self.patrol
        }
    }
}
