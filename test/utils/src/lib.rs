pub fn symptoms_fixture() -> &'static str {
    return "3-day history of mild fever, dry cough, sore throat, and fatigue. No known chronic conditions or recent travel.";
}
