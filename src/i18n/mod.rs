//! Display strings per language.
//!
//! Each language is one [`Strings`] record; the set of strings is fixed at
//! build time. Templates use `{}` placeholders filled in order by [`fill`].

use crate::domain::Language;

/// Layout direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    pub fn direction(self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::He => TextDirection::Rtl,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::He => &HE,
        }
    }
}

#[derive(Debug)]
pub struct Strings {
    pub language_name: &'static str,
    pub page_title: &'static str,
    pub intro: &'static str,

    // Settings
    pub config: &'static str,
    pub language: &'static str,
    pub ppp_rate: &'static str,
    pub household_size: &'static str,
    pub income_period: &'static str,
    pub annual: &'static str,
    pub monthly: &'static str,
    pub currency: &'static str,
    pub income: &'static str,
    pub standardize: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub standardize_warning: &'static str,
    pub data_loaded: &'static str,

    // Result panels
    pub results: &'static str,
    pub raw_income: &'static str,
    pub annual_usd_short: &'static str,
    pub annual_ils_short: &'static str,
    pub monthly_usd_short: &'static str,
    pub monthly_ils_short: &'static str,
    pub std_income: &'static str,
    /// `{size}`, `{scale}`
    pub divided_by: &'static str,
    pub percentile_position: &'static str,
    pub us_dist: &'static str,
    pub il_dist: &'static str,
    pub difference: &'static str,
    pub points: &'static str,
    pub using_precalc: &'static str,

    // Interpretation
    pub interpretation: &'static str,
    pub similar_position: &'static str,
    /// `{points}`
    pub higher_in_il: &'static str,
    /// `{points}`
    pub higher_in_us: &'static str,
    /// `{standardized_a | an}`, `{income}`
    pub this_means: &'static str,
    pub standardized_a: &'static str,
    pub an: &'static str,
    /// `{percentile}`, `{percentile}`
    pub us_percentile: &'static str,
    /// `{percentile}`, `{percentile}`
    pub il_percentile: &'static str,
    /// `{precalculated | manually_calculated}`
    pub note_analysis: &'static str,
    pub precalculated: &'static str,
    pub manually_calculated: &'static str,

    // Charts
    pub visual_analysis: &'static str,
    pub your_position: &'static str,
    pub income_distributions: &'static str,
    /// `{standardized_space | ""}`
    pub chart_shows_where: &'static str,
    pub standardized_space: &'static str,
    /// `{standardized_space | ""}`
    pub chart_shows_dist: &'static str,
    pub chart_percentile: &'static str,
    /// `{raw | standardized}`
    pub chart_annual_income: &'static str,
    /// `{raw | standardized}`
    pub chart_monthly_income: &'static str,
    /// `{raw | standardized}`
    pub chart_distributions_title: &'static str,
    /// `{raw | standardized}`
    pub chart_us_dist: &'static str,
    /// `{raw | standardized}`
    pub chart_il_dist: &'static str,
    pub chart_raw: &'static str,
    pub chart_standardized: &'static str,
    /// `{income}`
    pub chart_income_title: &'static str,
    /// `{percentile}`
    pub chart_us_label: &'static str,
    /// `{percentile}`
    pub chart_il_label: &'static str,

    // Key percentile table
    pub key_thresholds: &'static str,
    /// `{annual | monthly}`, `{standardized_a | ""}`
    pub income_at_key: &'static str,
    pub tbl_percentile: &'static str,
    /// `{table_standardized | ""}`
    pub tbl_us_income: &'static str,
    /// `{table_standardized | ""}`
    pub tbl_il_income_ils: &'static str,
    /// `{table_standardized | ""}`
    pub tbl_il_income_usd: &'static str,
    pub tbl_ratio: &'static str,
    pub tbl_standardized: &'static str,

    // Methodology
    pub methodology: &'static str,
    pub data_sources: &'static str,
    pub data_sources_text: &'static str,
    pub square_root: &'static str,
    pub square_root_text: &'static str,
    pub data_file: &'static str,
    pub data_file_text: &'static str,
    pub limitations: &'static str,
    pub limitations_text: &'static str,
    pub interpretation_header: &'static str,
    pub interpretation_text: &'static str,
    pub footer: &'static str,

    // TUI
    pub tui_help: &'static str,
    pub tui_editing: &'static str,
}

pub static EN: Strings = Strings {
    language_name: "English",
    page_title: "Israel-US Income Position Calculator",
    intro: "This tool helps you compare where your income would position you in both the Israeli and US distributions. It can standardize income by household size to provide per-capita comparisons.",

    config: "Configuration",
    language: "Language",
    ppp_rate: "PPP Rate (ILS to USD)",
    household_size: "Household size",
    income_period: "Income period",
    annual: "Annual",
    monthly: "Monthly",
    currency: "Currency",
    income: "Income",
    standardize: "Standardized per capita",
    yes: "yes",
    no: "no",
    standardize_warning: "Standardized income data is not available in the data file. The application will use manual standardization which may be less accurate than using pre-calculated standardized distributions.",
    data_loaded: "Data loaded successfully",

    results: "Results: Your Income Position",
    raw_income: "Raw Income",
    annual_usd_short: "Annual USD:",
    annual_ils_short: "Annual ILS:",
    monthly_usd_short: "Monthly USD:",
    monthly_ils_short: "Monthly ILS:",
    std_income: "Standardized Income",
    divided_by: "Divided by √{} = {}",
    percentile_position: "Percentile Position",
    us_dist: "US Distribution:",
    il_dist: "Israel Distribution:",
    difference: "Difference:",
    points: "points",
    using_precalc: "Using pre-calculated standardized distributions",

    interpretation: "Interpretation",
    similar_position: "Your income has a similar relative position in both countries.",
    higher_in_il: "Your income puts you {} percentile points higher in Israel than in the US.",
    higher_in_us: "Your income puts you {} percentile points higher in the US than in Israel.",
    this_means: "This means {}annual income of ${} would place you:",
    standardized_a: "a standardized ",
    an: "an ",
    us_percentile: "At the {}th percentile in the US (higher than {}% of US households)",
    il_percentile: "At the {}th percentile in Israel (higher than {}% of Israeli households)",
    note_analysis: "Note: This analysis uses {} standardized income distributions that account for household size.",
    precalculated: "pre-calculated",
    manually_calculated: "manually calculated",

    visual_analysis: "Visual Analysis",
    your_position: "Your Position",
    income_distributions: "Income Distributions",
    chart_shows_where: "This chart shows where your{} income falls within both distributions.",
    standardized_space: " standardized",
    chart_shows_dist: "This chart shows the{} income distributions of both countries.",
    chart_percentile: "Percentile",
    chart_annual_income: "Annual {} Income (USD)",
    chart_monthly_income: "Monthly {} Income (USD)",
    chart_distributions_title: "US vs Israel {} Income Distributions",
    chart_us_dist: "US {} Income Distribution",
    chart_il_dist: "Israel {} Income Distribution (USD PPP)",
    chart_raw: "Household",
    chart_standardized: "Standardized per Capita",
    chart_income_title: "Income of ${} in US vs Israel Distributions",
    chart_us_label: "US: {}%",
    chart_il_label: "Israel: {}%",

    key_thresholds: "Key Income Thresholds",
    income_at_key: "{} {}Income at Key Percentiles:",
    tbl_percentile: "Percentile",
    tbl_us_income: "{}US Income (USD)",
    tbl_il_income_ils: "{}Israel Income (ILS)",
    tbl_il_income_usd: "{}Israel Income (USD PPP)",
    tbl_ratio: "Ratio (US/Israel)",
    tbl_standardized: "Standardized ",

    methodology: "Methodology and Notes",
    data_sources: "Data Sources and Methodology",
    data_sources_text: "\
- Data Sources: This tool uses income percentile data from the provided data file.
- PPP Conversion: Israeli incomes are converted to USD using the selected Purchasing Power Parity (PPP) rate.
- Income Standardization: When selected, income is standardized by dividing by the square root of household size.
- Distribution Type: The tool can use either raw household income distributions or standardized per capita distributions.",
    square_root: "Square Root Equivalence Scale",
    square_root_text: "\
The square root scale divides household income by the square root of household size to account for economies of scale:

- For a household of 1 person: divide by √1 = 1 (no change)
- For a household of 2 people: divide by √2 ≈ 1.414
- For a household of 3 people: divide by √3 ≈ 1.732
- For a household of 4 people: divide by √4 = 2

This approach, used by the OECD and many economists, recognizes that larger households benefit from economies of scale in consumption.",
    data_file: "Data File Format",
    data_file_text: "\
For the most accurate comparisons, the data file should include both raw and standardized income distributions:

- Raw income columns: Percentile, US_Income_USD, Israel_Income_ILS
- Standardized income columns: US_Std_Income_USD, Israel_Std_Income_ILS

If standardized columns are not available, the tool will calculate standardized incomes manually.",
    limitations: "Limitations",
    limitations_text: "\
- This analysis does not account for differences in:
  - Tax systems
  - Benefits and social services
  - Cost of living within different regions of each country
  - Household composition (age, etc.)",
    interpretation_header: "Interpretation",
    interpretation_text: "\
The percentile position indicates where an income falls in the distribution of each country. For example,
being at the 75th percentile means your income is higher than 75% of households in that country.

A similar percentile position in both countries suggests that your relative economic standing would be
similar in either country, while a substantial difference indicates that your relative position would change.",
    footer: "This tool is for informational purposes only. Economic comparisons between countries are complex and involve many factors beyond income distributions.",

    tui_help: "↑/↓ select  ←/→ adjust  Enter edit income  Tab chart  q quit",
    tui_editing: "Editing income. Enter to apply, Esc to cancel.",
};

pub static HE: Strings = Strings {
    language_name: "עברית",
    page_title: "מחשבון מיקום הכנסה ישראל-ארה\"ב",
    intro: "כלי זה עוזר לך להשוות היכן ההכנסה שלך תמקם אותך בהתפלגויות של ישראל וארה\"ב. הוא יכול לתקנן הכנסה לפי גודל משק הבית כדי לספק השוואות לנפש.",

    config: "הגדרות",
    language: "שפה",
    ppp_rate: "שער PPP (ש\"ח לדולר)",
    household_size: "גודל משק הבית",
    income_period: "תקופת הכנסה",
    annual: "שנתי",
    monthly: "חודשי",
    currency: "מטבע",
    income: "הכנסה",
    standardize: "מתוקננת לנפש",
    yes: "כן",
    no: "לא",
    standardize_warning: "נתוני הכנסה מתוקננים אינם זמינים בקובץ הנתונים. האפליקציה תשתמש בתקנון ידני שעשוי להיות פחות מדויק מאשר שימוש בהתפלגויות מתוקננות שחושבו מראש.",
    data_loaded: "הנתונים נטענו בהצלחה",

    results: "תוצאות: מיקום ההכנסה שלך",
    raw_income: "הכנסה גולמית",
    annual_usd_short: "שנתי בדולר:",
    annual_ils_short: "שנתי בש\"ח:",
    monthly_usd_short: "חודשי בדולר:",
    monthly_ils_short: "חודשי בש\"ח:",
    std_income: "הכנסה מתוקננת",
    divided_by: "מחולק ב-√{} = {}",
    percentile_position: "מיקום באחוזונים",
    us_dist: "התפלגות ארה\"ב:",
    il_dist: "התפלגות ישראל:",
    difference: "הפרש:",
    points: "נקודות",
    using_precalc: "משתמש בהתפלגויות מתוקננות שחושבו מראש",

    interpretation: "פרשנות",
    similar_position: "להכנסה שלך יש מיקום יחסי דומה בשתי המדינות.",
    higher_in_il: "ההכנסה שלך ממקמת אותך {} נקודות אחוזון גבוה יותר בישראל מאשר בארה\"ב.",
    higher_in_us: "ההכנסה שלך ממקמת אותך {} נקודות אחוזון גבוה יותר בארה\"ב מאשר בישראל.",
    this_means: "משמעות הדבר היא שהכנסה שנתית {}של ${} תמקם אותך:",
    standardized_a: "מתוקננת ",
    an: "",
    us_percentile: "באחוזון ה-{} בארה\"ב (גבוה יותר מ-{}% ממשקי הבית בארה\"ב)",
    il_percentile: "באחוזון ה-{} בישראל (גבוה יותר מ-{}% ממשקי הבית בישראל)",
    note_analysis: "הערה: ניתוח זה משתמש בהתפלגויות הכנסה מתוקננות {} המתחשבות בגודל משק הבית.",
    precalculated: "שחושבו מראש",
    manually_calculated: "שחושבו ידנית",

    visual_analysis: "ניתוח חזותי",
    your_position: "המיקום שלך",
    income_distributions: "התפלגויות הכנסה",
    chart_shows_where: "תרשים זה מראה היכן ההכנסה{} שלך נמצאת בשתי ההתפלגויות.",
    standardized_space: " המתוקננת",
    chart_shows_dist: "תרשים זה מראה את התפלגויות ההכנסה{} של שתי המדינות.",
    chart_percentile: "אחוזון",
    chart_annual_income: "הכנסה שנתית {} (USD)",
    chart_monthly_income: "הכנסה חודשית {} (USD)",
    chart_distributions_title: "התפלגויות הכנסה {} ארה\"ב לעומת ישראל",
    chart_us_dist: "התפלגות הכנסה {} ארה\"ב",
    chart_il_dist: "התפלגות הכנסה {} ישראל (USD PPP)",
    chart_raw: "משק בית",
    chart_standardized: "מתוקננת לנפש",
    chart_income_title: "הכנסה של ${} בהתפלגויות ארה\"ב וישראל",
    chart_us_label: "ארה\"ב: {}%",
    chart_il_label: "ישראל: {}%",

    key_thresholds: "ספי הכנסה מרכזיים",
    income_at_key: "הכנסה {} {}באחוזונים מרכזיים:",
    tbl_percentile: "אחוזון",
    tbl_us_income: "הכנסה {}ארה\"ב (USD)",
    tbl_il_income_ils: "הכנסה {}ישראל (ILS)",
    tbl_il_income_usd: "הכנסה {}ישראל (USD PPP)",
    tbl_ratio: "יחס (ארה\"ב/ישראל)",
    tbl_standardized: "מתוקננת ",

    methodology: "מתודולוגיה והערות",
    data_sources: "מקורות נתונים ומתודולוגיה",
    data_sources_text: "\
- מקורות נתונים: כלי זה משתמש בנתוני אחוזוני הכנסה מקובץ הנתונים שסופק.
- המרת PPP: הכנסות ישראליות מומרות לדולר באמצעות שער שווי כוח הקנייה (PPP) שנבחר.
- תקנון הכנסה: כאשר נבחר, ההכנסה מתוקננת על ידי חלוקה בשורש הריבועי של גודל משק הבית.
- סוג ההתפלגות: הכלי יכול להשתמש בהתפלגויות הכנסה גולמיות של משקי בית או בהתפלגויות מתוקננות לנפש.",
    square_root: "סולם שקילות שורש ריבועי",
    square_root_text: "\
סולם השורש הריבועי מחלק את הכנסת משק הבית בשורש הריבועי של גודל משק הבית כדי להתחשב ביתרונות לגודל:

- עבור משק בית של אדם אחד: לחלק ב-√1 = 1 (ללא שינוי)
- עבור משק בית של 2 אנשים: לחלק ב-√2 ≈ 1.414
- עבור משק בית של 3 אנשים: לחלק ב-√3 ≈ 1.732
- עבור משק בית של 4 אנשים: לחלק ב-√4 = 2

גישה זו, המשמשת את ה-OECD וכלכלנים רבים, מכירה בכך שמשקי בית גדולים יותר נהנים מיתרונות לגודל בצריכה.",
    data_file: "פורמט קובץ נתונים",
    data_file_text: "\
להשוואות המדויקות ביותר, קובץ הנתונים צריך לכלול הן התפלגויות הכנסה גולמיות והן מתוקננות:

- עמודות הכנסה גולמית: Percentile, US_Income_USD, Israel_Income_ILS
- עמודות הכנסה מתוקננת: US_Std_Income_USD, Israel_Std_Income_ILS

אם עמודות מתוקננות אינן זמינות, הכלי יחשב הכנסות מתוקננות באופן ידני.",
    limitations: "מגבלות",
    limitations_text: "\
- ניתוח זה אינו מתחשב בהבדלים ב:
  - מערכות מס
  - הטבות ושירותים חברתיים
  - יוקר המחיה באזורים שונים של כל מדינה
  - הרכב משק הבית (גיל וכו')",
    interpretation_header: "פרשנות",
    interpretation_text: "\
מיקום האחוזון מציין היכן הכנסה נמצאת בהתפלגות של כל מדינה. לדוגמה,
להיות באחוזון ה-75 פירושו שההכנסה שלך גבוהה יותר מ-75% ממשקי הבית באותה מדינה.

מיקום אחוזון דומה בשתי המדינות מרמז על כך שהמעמד הכלכלי היחסי שלך יהיה
דומה בכל אחת מהמדינות, בעוד שהבדל משמעותי מצביע על כך שהמיקום היחסי שלך ישתנה.",
    footer: "כלי זה הוא למטרות מידע בלבד. השוואות כלכליות בין מדינות הן מורכבות וכוללות גורמים רבים מעבר להתפלגויות הכנסה.",

    tui_help: "↑/↓ בחירה  ←/→ שינוי  Enter עריכת הכנסה  Tab תרשים  q יציאה",
    tui_editing: "עריכת הכנסה. Enter לאישור, Esc לביטול.",
};

/// Fill `{}` placeholders in order. Extra placeholders are left as-is.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("{}") {
        let Some(arg) = args.next() else { break };
        out.push_str(&rest[..pos]);
        out.push_str(arg);
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
