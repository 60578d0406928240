use super::signals::{ComponentScore, IntentSignalBundle, ScoreWeights, SignalKind};

const JOB_POSTING_POINTS: u32 = 10;
const JOB_POSTING_CAP: u32 = 40;
const NEWS_MENTION_POINTS: u32 = 10;
const NEWS_MENTION_CAP: u32 = 30;
const WEBSITE_ACTIVITY_POINTS: f64 = 20.0;
const COMPETITOR_POINTS: u32 = 10;

pub(super) fn score_components(
    bundle: &IntentSignalBundle,
    weights: &ScoreWeights,
) -> (Vec<ComponentScore>, u8) {
    let components = vec![
        movement_component(bundle, weights.movement),
        renewal_component(bundle, weights.renewal),
        activity_component(bundle, weights.activity),
        size_component(bundle, weights.size),
    ];

    let composite: f64 = components
        .iter()
        .map(|component| f64::from(component.score) * f64::from(component.weight))
        .sum();
    let composite = composite.round().clamp(0.0, 100.0) as u8;

    (components, composite)
}

fn movement_component(bundle: &IntentSignalBundle, weight: f32) -> ComponentScore {
    let (score, notes) = if bundle.movement_detected {
        (100, "movement event detected".to_string())
    } else {
        (0, "no movement detected".to_string())
    };

    ComponentScore {
        signal: SignalKind::Movement,
        score,
        weight,
        notes,
    }
}

fn renewal_component(bundle: &IntentSignalBundle, weight: f32) -> ComponentScore {
    let (score, notes) = if bundle.in_renewal_window {
        (100, "currently inside the renewal window".to_string())
    } else {
        match bundle.days_until_renewal {
            None => (0, "no renewal data".to_string()),
            Some(days) => {
                let score = renewal_step(days);
                (score, format!("{days} day(s) until renewal"))
            }
        }
    };

    ComponentScore {
        signal: SignalKind::Renewal,
        score,
        weight,
        notes,
    }
}

/// Monotonically decreasing step function of days-until-renewal.
fn renewal_step(days: i64) -> u8 {
    if days <= 30 {
        90
    } else if days <= 60 {
        75
    } else if days <= 90 {
        60
    } else if days <= 120 {
        45
    } else if days <= 180 {
        30
    } else if days <= 270 {
        15
    } else {
        5
    }
}

fn activity_component(bundle: &IntentSignalBundle, weight: f32) -> ComponentScore {
    let jobs = (bundle.job_postings_count * JOB_POSTING_POINTS).min(JOB_POSTING_CAP);
    let news = (bundle.news_mentions_count * NEWS_MENTION_POINTS).min(NEWS_MENTION_CAP);
    let website =
        (f64::from(bundle.website_activity_score) / 100.0 * WEBSITE_ACTIVITY_POINTS).round() as u32;
    let competitor = if bundle.competitor_flag {
        COMPETITOR_POINTS
    } else {
        0
    };

    let score = (jobs + news + website + competitor).min(100) as u8;

    ComponentScore {
        signal: SignalKind::Activity,
        score,
        weight,
        notes: format!(
            "jobs {jobs} + news {news} + website {website} + competitor {competitor}"
        ),
    }
}

fn size_component(bundle: &IntentSignalBundle, weight: f32) -> ComponentScore {
    let employees = bundle.employee_count;
    let score = size_band(employees);

    ComponentScore {
        signal: SignalKind::FirmSize,
        score,
        weight,
        notes: format!("{employees} employees"),
    }
}

/// Bell-shaped bands over employee count, peaking in the 500-1000 range.
fn size_band(employees: u32) -> u8 {
    match employees {
        0..=49 => 20,
        50..=199 => 50,
        200..=499 => 80,
        500..=1000 => 100,
        1001..=2499 => 80,
        2500..=4999 => 60,
        5000..=9999 => 45,
        _ => 30,
    }
}
