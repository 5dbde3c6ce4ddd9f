//! Phenotypic-age mortality model (Levine 2018). Nine blood biomarkers plus
//! chronological age feed a fixed linear predictor and a Gompertz-type
//! hazard; the closed-form inverse turns 10-year mortality back into an
//! age-equivalent. All coefficients are published constants; there is no
//! calibration step and no side effect.

use super::severity::{
    albumin_g_dl_to_g_l, creatinine_mg_dl_to_umol_l, crp_mg_l_to_ln_mg_dl, glucose_mg_dl_to_mmol_l,
};
use super::{require_positive, ScoringError};
use serde::{Deserialize, Serialize};

const INTERCEPT: f64 = -19.907;
const W_ALBUMIN: f64 = -0.0336;
const W_CREATININE: f64 = 0.0095;
const W_GLUCOSE: f64 = 0.1953;
const W_LN_CRP: f64 = 0.0954;
const W_LYMPHOCYTE_PCT: f64 = -0.0120;
const W_MCV: f64 = 0.0268;
const W_RDW: f64 = 0.3306;
const W_ALK_PHOS: f64 = 0.00188;
const W_WBC: f64 = 0.0554;
const W_AGE: f64 = 0.0804;

const GOMPERTZ_GAMMA: f64 = 0.0076927;
const HORIZON_MONTHS: f64 = 120.0;

const INVERSE_C1: f64 = 141.50225;
const INVERSE_C2: f64 = 0.090165;
const INVERSE_C3: f64 = -0.00553;

// Keeps ln(ln(1 - mortality)) finite at both extremes.
const MORTALITY_EPSILON: f64 = 1e-15;

/// All nine biomarkers and chronological age are mandatory and must be
/// strictly positive; the model evaluates ln() over several of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenoAgeInputs {
    pub chronological_age: f64,
    /// g/dL
    pub albumin: f64,
    /// mg/dL
    pub creatinine: f64,
    /// mg/dL, fasting
    pub glucose: f64,
    /// mg/L, high-sensitivity
    pub crp: f64,
    /// percent of white cells
    pub lymphocyte_pct: f64,
    /// fL
    pub mean_cell_volume: f64,
    /// percent
    pub red_cell_distribution_width: f64,
    /// U/L
    pub alkaline_phosphatase: f64,
    /// 1000 cells/µL
    pub white_blood_cells: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenoAgeResult {
    pub linear_predictor: f64,
    /// Strictly inside (0, 1).
    pub mortality_10yr: f64,
    pub phenotypic_age_years: f64,
}

pub fn phenotypic_age(inputs: &PhenoAgeInputs) -> Result<PhenoAgeResult, ScoringError> {
    let age = require_positive("chronological_age", inputs.chronological_age)?;
    let albumin = require_positive("albumin", inputs.albumin)?;
    let creatinine = require_positive("creatinine", inputs.creatinine)?;
    let glucose = require_positive("glucose", inputs.glucose)?;
    let crp = require_positive("crp", inputs.crp)?;
    let lymphocyte_pct = require_positive("lymphocyte_pct", inputs.lymphocyte_pct)?;
    let mcv = require_positive("mean_cell_volume", inputs.mean_cell_volume)?;
    let rdw = require_positive(
        "red_cell_distribution_width",
        inputs.red_cell_distribution_width,
    )?;
    let alk_phos = require_positive("alkaline_phosphatase", inputs.alkaline_phosphatase)?;
    let wbc = require_positive("white_blood_cells", inputs.white_blood_cells)?;

    let linear_predictor = INTERCEPT
        + W_ALBUMIN * albumin_g_dl_to_g_l(albumin)
        + W_CREATININE * creatinine_mg_dl_to_umol_l(creatinine)
        + W_GLUCOSE * glucose_mg_dl_to_mmol_l(glucose)
        + W_LN_CRP * crp_mg_l_to_ln_mg_dl(crp)
        + W_LYMPHOCYTE_PCT * lymphocyte_pct
        + W_MCV * mcv
        + W_RDW * rdw
        + W_ALK_PHOS * alk_phos
        + W_WBC * wbc
        + W_AGE * age;

    let hazard = linear_predictor.exp() * ((HORIZON_MONTHS * GOMPERTZ_GAMMA).exp() - 1.0)
        / GOMPERTZ_GAMMA;
    let mortality_10yr =
        (1.0 - (-hazard).exp()).clamp(MORTALITY_EPSILON, 1.0 - MORTALITY_EPSILON);

    let phenotypic_age_years =
        INVERSE_C1 + (INVERSE_C3 * (1.0 - mortality_10yr).ln()).ln() / INVERSE_C2;

    Ok(PhenoAgeResult {
        linear_predictor,
        mortality_10yr,
        phenotypic_age_years,
    })
}
