// bioprobe
// Copyright (c) 2024 The bioprobe Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ECG lead reconstruction from partial lead sets: detect which packing layout an input uses,
//! then derive the remaining standard leads from the limb-lead identities (or, for precordial
//! leads with no available source signal, a deterministic non-physiological filler).
//!
//! V1..V6 are never clinically inferred here. When absent they're filled with a shaped but
//! arbitrary signal derived from lead II, documented as such rather than presented as real data.

use probe_core::error::{malformed, too_short, Result};
use probe_core::model::LeadSet;

const BYTES_PER_SAMPLE: usize = 2;

/// Tries the 3-lead, 8-lead, then interleaved layouts in order; the first that fits the input's
/// size produces the result. If none of those apply but the input is at least 24 bytes (one
/// i16 sample per standard lead), falls back to treating it as a direct packed 12-lead layout.
pub fn decompress_ecg_leads(data: &[u8]) -> Result<Vec<u8>> {
    if let Ok(out) = decompress_ecg_leads_3lead(data) {
        return Ok(out);
    }
    if let Ok(out) = decompress_ecg_leads_8lead(data) {
        return Ok(out);
    }
    if let Ok(out) = decompress_ecg_leads_interleaved(data) {
        return Ok(out);
    }
    decompress_ecg_leads_12lead_packed(data)
}

/// Twelve equal-length i16-LE runs, one per standard lead in order. Unlike the 3-lead and
/// 8-lead packed layouts, every standard lead is already present, so no derivation runs; the
/// extracted samples are serialized as-is.
pub fn decompress_ecg_leads_12lead_packed(data: &[u8]) -> Result<Vec<u8>> {
    const GROUPS: usize = 12;
    if data.len() < BYTES_PER_SAMPLE * GROUPS || data.len() % (GROUPS * BYTES_PER_SAMPLE) != 0 {
        return too_short("12-lead packed ECG input does not split evenly into twelve i16 runs");
    }

    let run_len = data.len() / GROUPS;
    let mut leads = LeadSet::new();
    for (i, name) in probe_core::model::STANDARD_LEAD_ORDER.iter().enumerate() {
        let samples = read_i16_le(&data[i * run_len..(i + 1) * run_len]);
        leads.insert(name, samples);
    }

    Ok(leads.serialize_standard_order())
}

/// First third of the input is lead I, second third lead II, last third lead III, each i16-LE.
pub fn decompress_ecg_leads_3lead(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < BYTES_PER_SAMPLE * 3 || data.len() % (3 * BYTES_PER_SAMPLE) != 0 {
        return too_short("3-lead ECG input does not split evenly into three i16 runs");
    }

    let run_len = data.len() / 3;
    let i = read_i16_le(&data[0..run_len]);
    let ii = read_i16_le(&data[run_len..2 * run_len]);
    let iii = read_i16_le(&data[2 * run_len..3 * run_len]);

    let mut leads = LeadSet::new();
    leads.insert("I", i);
    leads.insert("II", ii);
    leads.insert("III", iii);

    reconstruct_from_available_leads(&mut leads);
    Ok(leads.serialize_standard_order())
}

/// Eight equal-length i16-LE runs for the first eight standard leads (I, II, III, aVR, aVL, aVF,
/// V1, V2).
pub fn decompress_ecg_leads_8lead(data: &[u8]) -> Result<Vec<u8>> {
    const GROUPS: usize = 8;
    if data.len() < BYTES_PER_SAMPLE * GROUPS || data.len() % (GROUPS * BYTES_PER_SAMPLE) != 0 {
        return too_short("8-lead ECG input does not split evenly into eight i16 runs");
    }

    let run_len = data.len() / GROUPS;
    let names = ["I", "II", "III", "aVR", "aVL", "aVF", "V1", "V2"];

    let mut leads = LeadSet::new();
    for (i, name) in names.iter().enumerate() {
        let samples = read_i16_le(&data[i * run_len..(i + 1) * run_len]);
        leads.insert(name, samples);
    }

    reconstruct_from_available_leads(&mut leads);
    Ok(leads.serialize_standard_order())
}

/// `L` leads interleaved sample-by-sample: `[lead0_s0, lead1_s0, ..., leadL-1_s0, lead0_s1, ...]`.
/// Tries `L in {3, 8, 12}`.
pub fn decompress_ecg_leads_interleaved(data: &[u8]) -> Result<Vec<u8>> {
    for &lead_count in &[3usize, 8, 12] {
        if let Ok(leads) = try_interleaved(data, lead_count) {
            return Ok(leads);
        }
    }
    malformed("no interleaved lead count evenly divides the input")
}

fn try_interleaved(data: &[u8], lead_count: usize) -> Result<Vec<u8>> {
    let frame_len = lead_count * BYTES_PER_SAMPLE;
    if frame_len == 0 || data.len() < frame_len || data.len() % frame_len != 0 {
        return too_short("interleaved ECG input does not split evenly into frames");
    }

    let sample_count = data.len() / frame_len;
    let names: &[&str] = match lead_count {
        3 => &["I", "II", "III"],
        8 => &["I", "II", "III", "aVR", "aVL", "aVF", "V1", "V2"],
        12 => &probe_core::model::STANDARD_LEAD_ORDER,
        _ => return malformed("unsupported interleaved lead count"),
    };

    let mut per_lead: Vec<Vec<i16>> = vec![Vec::with_capacity(sample_count); lead_count];
    for sample_index in 0..sample_count {
        for (lead_index, bucket) in per_lead.iter_mut().enumerate() {
            let offset = sample_index * frame_len + lead_index * BYTES_PER_SAMPLE;
            bucket.push(i16::from_le_bytes([data[offset], data[offset + 1]]));
        }
    }

    let mut leads = LeadSet::new();
    for (name, samples) in names.iter().zip(per_lead) {
        leads.insert(name, samples);
    }

    reconstruct_from_available_leads(&mut leads);
    Ok(leads.serialize_standard_order())
}

fn read_i16_le(bytes: &[u8]) -> Vec<i16> {
    bytes.chunks_exact(2).map(|c| i16::from_le_bytes([c[0], c[1]])).collect()
}

/// Fills in whatever standard leads are missing from `leads`, given whatever subset is present.
/// If I, II, and III are all present the limb-lead identities derive aVR/aVL/aVF exactly;
/// otherwise every missing lead (including the limb leads) falls back to the lead-II-derived
/// filler used for the precordial leads.
fn reconstruct_from_available_leads(leads: &mut LeadSet) {
    if leads.contains("I") && leads.contains("II") && leads.contains("III") {
        derive_limb_leads(leads);
    }

    derive_precordial_leads(leads);
}

/// `aVR = -(I + II)/2`, `aVL = I - II/2`, `aVF = II - I/2` (integer division), sample-wise.
fn derive_limb_leads(leads: &mut LeadSet) {
    let i = leads.get("I").expect("caller checked presence").to_vec();
    let ii = leads.get("II").expect("caller checked presence").to_vec();
    let n = i.len().min(ii.len());

    if !leads.contains("aVR") {
        let avr: Vec<i16> = (0..n).map(|k| (-(i32::from(i[k]) + i32::from(ii[k])) / 2) as i16).collect();
        leads.insert("aVR", avr);
    }
    if !leads.contains("aVL") {
        let avl: Vec<i16> = (0..n).map(|k| (i32::from(i[k]) - i32::from(ii[k]) / 2) as i16).collect();
        leads.insert("aVL", avl);
    }
    if !leads.contains("aVF") {
        let avf: Vec<i16> = (0..n).map(|k| (i32::from(ii[k]) - i32::from(i[k]) / 2) as i16).collect();
        leads.insert("aVF", avf);
    }
}

/// V1..V6, when absent, are filled with `base = II/3` plus a small additive pattern per lead
/// index. This is explicitly non-physiological filler, not a clinical estimate.
fn derive_precordial_leads(leads: &mut LeadSet) {
    let base_source: Vec<i16> = match leads.get("II") {
        Some(ii) => ii.to_vec(),
        None => return,
    };

    let n = base_source.len();
    let base: Vec<i32> = base_source.iter().map(|&v| i32::from(v) / 3).collect();

    let patterns: [fn(usize) -> i32; 6] = [
        |k| (k % 8) as i32 * 2,
        |k| (k % 6) as i32,
        |_k| 0,
        |k| (k % 6) as i32,
        |k| (k % 8) as i32 * 2,
        |k| (k % 10) as i32 * 3,
    ];

    for (lead_index, name) in ["V1", "V2", "V3", "V4", "V5", "V6"].iter().enumerate() {
        if leads.contains(name) {
            continue;
        }
        let pattern = patterns[lead_index];
        let samples: Vec<i16> = (0..n).map(|k| (base[k] + pattern(k)).clamp(-32768, 32767) as i16).collect();
        leads.insert(name, samples);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_i16(values: &[i16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn three_lead_layout_extracts_and_derives_limb_leads() {
        let mut data = encode_i16(&[100, 100]);
        data.extend(encode_i16(&[50, 50]));
        data.extend(encode_i16(&[25, 25]));

        let out = decompress_ecg_leads_3lead(&data).unwrap();
        // 12 leads * 2 samples * 2 bytes = 48 bytes.
        assert_eq!(out.len(), 48);
    }

    #[test]
    fn three_lead_layout_rejects_input_not_divisible_by_three() {
        assert!(decompress_ecg_leads_3lead(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn eight_lead_layout_extracts_all_eight_groups() {
        let mut data = Vec::new();
        for _ in 0..8 {
            data.extend(encode_i16(&[10, 20]));
        }
        let out = decompress_ecg_leads_8lead(&data).unwrap();
        assert_eq!(out.len(), 48);
    }

    #[test]
    fn twelve_lead_packed_layout_extracts_all_groups_without_derivation() {
        let mut data = Vec::new();
        for lead in 0..12 {
            data.extend(encode_i16(&[lead as i16, lead as i16 * 2]));
        }
        let out = decompress_ecg_leads_12lead_packed(&data).unwrap();
        assert_eq!(out.len(), 48);
        // aVR is the 4th lead (index 3) in standard order; its samples should be exactly what
        // was packed in, not a derived value.
        assert_eq!(&out[3 * 4..3 * 4 + 4], &encode_i16(&[3, 6])[..]);
    }

    #[test]
    fn twelve_lead_packed_layout_rejects_input_not_divisible_by_twelve() {
        assert!(decompress_ecg_leads_12lead_packed(&[1, 2, 3]).is_err());
    }

    #[test]
    fn combined_entry_point_falls_through_layouts() {
        // A 3-lead-shaped input (divisible by 6 bytes, i.e. 3 leads * 2-byte samples) should be
        // picked up by the 3-lead layout first.
        let mut data = encode_i16(&[1, 2]);
        data.extend(encode_i16(&[3, 4]));
        data.extend(encode_i16(&[5, 6]));
        let out = decompress_ecg_leads(&data).unwrap();
        assert_eq!(out.len(), 48);
    }

    #[test]
    fn limb_lead_identities_match_worked_values() {
        let mut leads = LeadSet::new();
        leads.insert("I", vec![100]);
        leads.insert("II", vec![50]);
        leads.insert("III", vec![50]);
        derive_limb_leads(&mut leads);
        assert_eq!(leads.get("aVR").unwrap(), [-75]);
        assert_eq!(leads.get("aVL").unwrap(), [75]);
        assert_eq!(leads.get("aVF").unwrap(), [0]);
    }

    #[test]
    fn precordial_filler_is_deterministic_and_bounded() {
        let mut leads = LeadSet::new();
        leads.insert("II", vec![300, 600]);
        derive_precordial_leads(&mut leads);
        for name in ["V1", "V2", "V3", "V4", "V5", "V6"] {
            assert!(leads.contains(name));
        }
    }
}
