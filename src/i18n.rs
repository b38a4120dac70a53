use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const HINT_KEEP_CURRENT: &str = "hint.keep_current";
    pub const EMPTY: &str = "general.empty";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_FLUID: &str = "main_menu.fluid";
    pub const MAIN_MENU_ADD_SEGMENT: &str = "main_menu.add_segment";
    pub const MAIN_MENU_CONFIGURE_SEGMENTS: &str = "main_menu.configure_segments";
    pub const MAIN_MENU_REMOVE_SEGMENT: &str = "main_menu.remove_segment";
    pub const MAIN_MENU_ADD_FITTING: &str = "main_menu.add_fitting";
    pub const MAIN_MENU_REMOVE_FITTING: &str = "main_menu.remove_fitting";
    pub const MAIN_MENU_SHOW: &str = "main_menu.show";
    pub const MAIN_MENU_GRADE: &str = "main_menu.grade";
    pub const MAIN_MENU_TABLES: &str = "main_menu.tables";
    pub const MAIN_MENU_SAVE: &str = "main_menu.save";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";

    pub const FLUID_HEADING: &str = "fluid.heading";
    pub const PROMPT_DENSITY: &str = "prompt.density";
    pub const PROMPT_VISCOSITY: &str = "prompt.viscosity";
    pub const PROMPT_FLOW_RATE: &str = "prompt.flow_rate";

    pub const SEGMENT_HEADING: &str = "segment.heading";
    pub const SEGMENT_LABEL: &str = "segment.label";
    pub const PROMPT_MATERIAL: &str = "prompt.material";
    pub const PROMPT_DIAMETER_MODE: &str = "prompt.diameter_mode";
    pub const PROMPT_NPS: &str = "prompt.nps";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const SEGMENT_ADDED: &str = "segment.added";
    pub const CONFIGURE_HEADING: &str = "configure.heading";
    pub const PROMPT_SEGMENT_COUNT: &str = "prompt.segment_count";
    pub const PROMPT_TOTAL_LENGTH: &str = "prompt.total_length";
    pub const WARN_TOTAL_LENGTH_IGNORED: &str = "configure.total_length_ignored";

    pub const FITTING_HEADING: &str = "fitting.heading";
    pub const FITTING_LABEL: &str = "fitting.label";
    pub const PROMPT_FITTING_TYPE: &str = "prompt.fitting_type";
    pub const PROMPT_FITTING_COUNT: &str = "prompt.fitting_count";
    pub const PROMPT_FITTING_SEGMENT: &str = "prompt.fitting_segment";
    pub const FITTING_NEEDS_SEGMENT: &str = "fitting.needs_segment";
    pub const FITTING_ADDED: &str = "fitting.added";

    pub const REMOVE_HEADING: &str = "remove.heading";
    pub const PROMPT_REMOVE_NUMBER: &str = "prompt.remove_number";
    pub const REMOVED: &str = "remove.done";
    pub const NOTHING_TO_REMOVE: &str = "remove.nothing";

    pub const SHOW_HEADING: &str = "show.heading";
    pub const SHOW_FLUID: &str = "show.fluid";
    pub const SHOW_SEGMENTS: &str = "show.segments";
    pub const SHOW_FITTINGS: &str = "show.fittings";
    pub const SHOW_LENGTH_HINT: &str = "show.length_hint";

    pub const GRADE_HEADING: &str = "grade.heading";
    pub const PROMPT_ANSWER: &str = "prompt.answer";

    pub const RESULT_ERROR: &str = "result.error";
    pub const RESULT_MAJOR_LOSS: &str = "result.major_loss";
    pub const RESULT_MINOR_LOSS: &str = "result.minor_loss";
    pub const RESULT_TOTAL_LOSS: &str = "result.total_loss";
    pub const RESULT_SEGMENTS: &str = "result.segments";
    pub const REGIME_LAMINAR: &str = "regime.laminar";
    pub const REGIME_TURBULENT: &str = "regime.turbulent";

    pub const TIER_GREEN: &str = "tier.green";
    pub const TIER_YELLOW: &str = "tier.yellow";
    pub const TIER_RED: &str = "tier.red";
    pub const TIER_GREEN_DESCRIPTION: &str = "tier.green_description";
    pub const TIER_YELLOW_DESCRIPTION: &str = "tier.yellow_description";
    pub const TIER_RED_DESCRIPTION: &str = "tier.red_description";

    pub const STATS_HEADING: &str = "stats.heading";
    pub const STATS_NONE: &str = "stats.none";
    pub const STATS_ATTEMPTS: &str = "stats.attempts";
    pub const STATS_DOMINANT: &str = "stats.dominant";

    pub const TABLES_HEADING: &str = "tables.heading";
    pub const TABLES_MATERIALS: &str = "tables.materials";
    pub const TABLES_SCHEDULES: &str = "tables.schedules";
    pub const TABLES_FITTINGS: &str = "tables.fittings";

    pub const PROMPT_SAVE_PATH: &str = "prompt.save_path";
    pub const SAVED_TO: &str = "save.done";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        match normalize_lang(code).as_deref() {
            Some("en") => Language::En,
            _ => Language::Ko,
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 → 내장 영어(en 일 때) → 내장 한국어 순으로 찾고,
    /// 어디에도 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).or_else(|| ko(key)).unwrap_or(key),
            Language::Ko => ko(key).unwrap_or(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// `dir/{lang}.toml` 언어팩을 읽어 `section.key` 형태의 평탄한 맵으로 만든다.
/// 문자열이 아닌 값은 무시한다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let src = fs::read_to_string(Path::new(dir).join(format!("{lang}.toml"))).ok()?;
    let table: toml::Table = src.parse().ok()?;
    let mut map = HashMap::new();
    flatten_into(&mut map, "", &table);
    (!map.is_empty()).then_some(map)
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: &str, table: &toml::Table) {
    for (name, value) in table {
        let key = match prefix {
            "" => name.clone(),
            _ => format!("{prefix}.{name}"),
        };
        match value {
            toml::Value::String(text) => {
                out.insert(key, text.clone());
            }
            toml::Value::Table(inner) => flatten_into(out, &key, inner),
            _ => {}
        }
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        HINT_KEEP_CURRENT => "(엔터를 누르면 현재 값을 유지합니다)",
        EMPTY => "(없음)",
        MAIN_MENU_TITLE => "\n=== HidraSeries: 직렬 배관 손실수두 채점기 ===",
        MAIN_MENU_FLUID => "1) 유체 및 유량 입력",
        MAIN_MENU_ADD_SEGMENT => "2) 배관 구간 추가",
        MAIN_MENU_CONFIGURE_SEGMENTS => "3) 구간 일괄 생성 (개수/총 길이)",
        MAIN_MENU_REMOVE_SEGMENT => "4) 배관 구간 삭제",
        MAIN_MENU_ADD_FITTING => "5) 부속 추가",
        MAIN_MENU_REMOVE_FITTING => "6) 부속 삭제",
        MAIN_MENU_SHOW => "7) 현재 구성 및 통계 보기",
        MAIN_MENU_GRADE => "8) 채점하기",
        MAIN_MENU_TABLES => "9) 참조 테이블",
        MAIN_MENU_SAVE => "10) 구성을 파일로 저장",
        MAIN_MENU_SETTINGS => "11) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        FLUID_HEADING => "\n-- 유체 및 유량 --",
        PROMPT_DENSITY => "유체 밀도 ρ [kg/m3]",
        PROMPT_VISCOSITY => "동점성계수 ν [m2/s]",
        PROMPT_FLOW_RATE => "체적 유량 Q [m3/s]",
        SEGMENT_HEADING => "\n-- 배관 구간 추가 --",
        SEGMENT_LABEL => "구간",
        PROMPT_MATERIAL => "재질 번호",
        PROMPT_DIAMETER_MODE => "내경 입력 방식 (0=직접 입력, 1=schedule 40, 2=schedule 60, 3=schedule 80)",
        PROMPT_NPS => "NPS [in] (예: 0.75, 2)",
        PROMPT_DIAMETER => "내경 D [m]",
        PROMPT_LENGTH => "길이 L [m]",
        SEGMENT_ADDED => "구간이 추가되었습니다.",
        CONFIGURE_HEADING => "\n-- 구간 일괄 생성 --",
        PROMPT_SEGMENT_COUNT => "만들 구간 수 (1 이상의 정수)",
        PROMPT_TOTAL_LENGTH => "총 배관 길이 [m] (비워 두면 지정하지 않음)",
        WARN_TOTAL_LENGTH_IGNORED => "총 길이는 양수여야 합니다. 이 값은 무시합니다.",
        FITTING_HEADING => "\n-- 부속 추가 --",
        FITTING_LABEL => "부속",
        PROMPT_FITTING_TYPE => "부속 종류 번호",
        PROMPT_FITTING_COUNT => "개수",
        PROMPT_FITTING_SEGMENT => "연결 구간 번호",
        FITTING_NEEDS_SEGMENT => "먼저 배관 구간을 추가하세요.",
        FITTING_ADDED => "부속이 추가되었습니다.",
        REMOVE_HEADING => "\n-- 삭제 --",
        PROMPT_REMOVE_NUMBER => "삭제할 번호",
        REMOVED => "삭제했습니다.",
        NOTHING_TO_REMOVE => "삭제할 항목이 없습니다.",
        SHOW_HEADING => "\n-- 현재 구성 --",
        SHOW_FLUID => "ρ [kg/m3] / ν [m2/s] / Q [m3/s]:",
        SHOW_SEGMENTS => "배관 구간:",
        SHOW_FITTINGS => "부속:",
        SHOW_LENGTH_HINT => "현재 구간 길이 합계:",
        GRADE_HEADING => "\n-- 채점 --",
        PROMPT_ANSWER => "총 손실수두 h_L [m] 답",
        RESULT_ERROR => "오차 ≈",
        RESULT_MAJOR_LOSS => "주 손실(직관부): h_f ≈",
        RESULT_MINOR_LOSS => "부차 손실(부속): h_m ≈",
        RESULT_TOTAL_LOSS => "계산된 총 손실수두: h_L,total ≈",
        RESULT_SEGMENTS => "구간별 계산 결과:",
        REGIME_LAMINAR => "층류",
        REGIME_TURBULENT => "난류",
        TIER_GREEN => "초록",
        TIER_YELLOW => "노랑",
        TIER_RED => "빨강",
        TIER_GREEN_DESCRIPTION => "정답에 매우 가까운 답입니다.",
        TIER_YELLOW_DESCRIPTION => "어느 정도 근접한 답이지만 개선의 여지가 있습니다.",
        TIER_RED_DESCRIPTION => "계산된 값과 차이가 큰 답입니다.",
        STATS_HEADING => "\n-- 이 구성의 시도 통계 --",
        STATS_NONE => "이 구성으로 기록된 시도가 없습니다.",
        STATS_ATTEMPTS => "기록된 시도 횟수:",
        STATS_DOMINANT => "가장 자주 나온 등급:",
        TABLES_HEADING => "\n-- 참조 테이블 --",
        TABLES_MATERIALS => "재질별 절대 거칠기 ε [m]:",
        TABLES_SCHEDULES => "schedule 별 내경 [m]:",
        TABLES_FITTINGS => "부속 손실계수 K:",
        PROMPT_SAVE_PATH => "저장할 파일 경로",
        SAVED_TO => "저장했습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어 설정:",
        SETTINGS_OPTIONS => "1) 자동  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정이 변경되었습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        HINT_KEEP_CURRENT => "(press enter to keep the current value)",
        EMPTY => "(none)",
        MAIN_MENU_TITLE => "\n=== HidraSeries: series pipe head-loss grader ===",
        MAIN_MENU_FLUID => "1) Fluid and flow rate",
        MAIN_MENU_ADD_SEGMENT => "2) Add pipe segment",
        MAIN_MENU_CONFIGURE_SEGMENTS => "3) Create segments (count/total length)",
        MAIN_MENU_REMOVE_SEGMENT => "4) Remove pipe segment",
        MAIN_MENU_ADD_FITTING => "5) Add fitting",
        MAIN_MENU_REMOVE_FITTING => "6) Remove fitting",
        MAIN_MENU_SHOW => "7) Show configuration and statistics",
        MAIN_MENU_GRADE => "8) Grade answer",
        MAIN_MENU_TABLES => "9) Reference tables",
        MAIN_MENU_SAVE => "10) Save configuration to file",
        MAIN_MENU_SETTINGS => "11) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        FLUID_HEADING => "\n-- Fluid and flow rate --",
        PROMPT_DENSITY => "Fluid density ρ [kg/m3]",
        PROMPT_VISCOSITY => "Kinematic viscosity ν [m2/s]",
        PROMPT_FLOW_RATE => "Volumetric flow rate Q [m3/s]",
        SEGMENT_HEADING => "\n-- Add pipe segment --",
        SEGMENT_LABEL => "Segment",
        PROMPT_MATERIAL => "Material number",
        PROMPT_DIAMETER_MODE => "Diameter mode (0=direct, 1=schedule 40, 2=schedule 60, 3=schedule 80)",
        PROMPT_NPS => "NPS [in] (e.g. 0.75, 2)",
        PROMPT_DIAMETER => "Inner diameter D [m]",
        PROMPT_LENGTH => "Length L [m]",
        SEGMENT_ADDED => "Segment added.",
        CONFIGURE_HEADING => "\n-- Create segments --",
        PROMPT_SEGMENT_COUNT => "Number of segments (integer ≥ 1)",
        PROMPT_TOTAL_LENGTH => "Total pipe length [m] (blank to leave unset)",
        WARN_TOTAL_LENGTH_IGNORED => "Total length must be positive; ignoring it.",
        FITTING_HEADING => "\n-- Add fitting --",
        FITTING_LABEL => "Fitting",
        PROMPT_FITTING_TYPE => "Fitting type number",
        PROMPT_FITTING_COUNT => "Count",
        PROMPT_FITTING_SEGMENT => "Associated segment number",
        FITTING_NEEDS_SEGMENT => "Add a pipe segment first.",
        FITTING_ADDED => "Fitting added.",
        REMOVE_HEADING => "\n-- Remove --",
        PROMPT_REMOVE_NUMBER => "Number to remove",
        REMOVED => "Removed.",
        NOTHING_TO_REMOVE => "Nothing to remove.",
        SHOW_HEADING => "\n-- Current configuration --",
        SHOW_FLUID => "ρ [kg/m3] / ν [m2/s] / Q [m3/s]:",
        SHOW_SEGMENTS => "Pipe segments:",
        SHOW_FITTINGS => "Fittings:",
        SHOW_LENGTH_HINT => "Current sum of segment lengths:",
        GRADE_HEADING => "\n-- Grading --",
        PROMPT_ANSWER => "Your total head loss h_L [m]",
        RESULT_ERROR => "error ≈",
        RESULT_MAJOR_LOSS => "Major losses (straight pipe): h_f ≈",
        RESULT_MINOR_LOSS => "Minor losses (fittings): h_m ≈",
        RESULT_TOTAL_LOSS => "Computed total head loss: h_L,total ≈",
        RESULT_SEGMENTS => "Per-segment results:",
        REGIME_LAMINAR => "laminar",
        REGIME_TURBULENT => "turbulent",
        TIER_GREEN => "Green",
        TIER_YELLOW => "Yellow",
        TIER_RED => "Red",
        TIER_GREEN_DESCRIPTION => "Very close to the solution.",
        TIER_YELLOW_DESCRIPTION => "Reasonably close, but with room for improvement.",
        TIER_RED_DESCRIPTION => "Far from the computed value.",
        STATS_HEADING => "\n-- Attempt statistics for this configuration --",
        STATS_NONE => "No attempts recorded for this configuration.",
        STATS_ATTEMPTS => "Recorded attempts:",
        STATS_DOMINANT => "Most frequent tier:",
        TABLES_HEADING => "\n-- Reference tables --",
        TABLES_MATERIALS => "Absolute roughness ε by material [m]:",
        TABLES_SCHEDULES => "Inner diameter by schedule [m]:",
        TABLES_FITTINGS => "Fitting loss coefficients K:",
        PROMPT_SAVE_PATH => "File path to save",
        SAVED_TO => "Saved:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language setting:",
        SETTINGS_OPTIONS => "1) Auto  2) 한국어  3) English",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        _ => return None,
    })
}
