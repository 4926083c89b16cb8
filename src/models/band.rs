//! # 能带数据模型
//!
//! 存储每个 k 点的 VBM/CBM 以及由此导出的带隙。
//!
//! ## 依赖关系
//! - 被 `parsers/outcar.rs` 填充
//! - 被 `report/` 和 `commands/gap.rs` 使用

use crate::error::VaspGapError;

use serde::Serialize;
use std::collections::BTreeMap;

/// 单个 k 点的能带边信息
///
/// VBM 与 CBM 初始均未设置；CBM 一旦设置不再覆盖。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KPointRecord {
    /// k 点编号（OUTCAR 中的 1 起编号）
    pub id: u64,

    /// 价带顶 (eV)
    pub vbm: Option<f64>,

    /// 导带底 (eV)
    pub cbm: Option<f64>,
}

impl KPointRecord {
    pub fn new(id: u64) -> Self {
        KPointRecord {
            id,
            vbm: None,
            cbm: None,
        }
    }

    /// VBM 与 CBM 是否都已找到
    pub fn is_complete(&self) -> bool {
        self.vbm.is_some() && self.cbm.is_some()
    }

    /// 计算带隙，数据不完整时返回 None
    pub fn band_gap(&self) -> Option<BandGap> {
        match (self.vbm, self.cbm) {
            (Some(vbm), Some(cbm)) => Some(BandGap {
                kpoint: self.id,
                vbm,
                cbm,
                gap: cbm - vbm,
            }),
            _ => None,
        }
    }
}

/// 某个 k 点上的带隙
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandGap {
    pub kpoint: u64,
    pub vbm: f64,
    pub cbm: f64,
    /// CBM - VBM (eV)
    pub gap: f64,
}

/// 一个 OUTCAR 的能带解析结果
#[derive(Debug, Default)]
pub struct BandStructure {
    /// 按 k 点编号升序排列的记录
    pub kpoints: BTreeMap<u64, KPointRecord>,

    /// 跳过的行（不会中止解析）
    pub warnings: Vec<VaspGapError>,
}

impl BandStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.kpoints.is_empty()
    }

    /// 所有数据完整的 k 点的带隙，按编号升序
    pub fn gaps(&self) -> impl Iterator<Item = BandGap> + '_ {
        self.kpoints.values().filter_map(KPointRecord::band_gap)
    }

    /// 最小带隙；相等时取编号较小者
    pub fn minimum_gap(&self) -> Option<BandGap> {
        let mut best: Option<BandGap> = None;
        for gap in self.gaps() {
            let replace = match best {
                None => true,
                Some(b) => gap.gap < b.gap,
            };
            if replace {
                best = Some(gap);
            }
        }
        best
    }

    /// 数据不完整的 k 点数
    pub fn incomplete_count(&self) -> usize {
        self.kpoints.values().filter(|k| !k.is_complete()).count()
    }
}
