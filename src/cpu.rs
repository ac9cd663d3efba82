//! Runtime CPU feature detection
//!
//! Detects the instruction-set extensions the SIMD tiers depend on, once per
//! process. On x86_64 detection goes through `cpuid`; on aarch64 NEON is part
//! of the baseline and the rest is read from `/proc/cpuinfo` where available.
//! Every other architecture gets a conservative default set that routes all
//! operations to the scalar loops.

use std::sync::OnceLock;

/// Detected CPU features relevant to byte-level memory operations
#[derive(Debug, Clone)]
pub struct CpuFeatures {
    /// SSE2 available (x86_64 baseline)
    pub has_sse2: bool,
    /// SSE4.1 available
    pub has_sse41: bool,
    /// SSE4.2 available
    pub has_sse42: bool,
    /// AVX available
    pub has_avx: bool,
    /// AVX2 available
    pub has_avx2: bool,
    /// POPCNT available
    pub has_popcnt: bool,
    /// NEON available (aarch64 baseline)
    pub has_neon: bool,
    /// Unaligned loads/stores are cheap on this CPU
    pub has_unaligned_access: bool,
    /// CPU vendor string
    pub vendor: String,
    /// CPU model name
    pub model: String,
    /// Number of logical cores
    pub logical_cores: usize,
    /// Cache line size in bytes (typically 64)
    pub cache_line_size: usize,
}

impl CpuFeatures {
    /// Conservative feature set for architectures without a detector
    fn baseline() -> Self {
        Self {
            has_sse2: false,
            has_sse41: false,
            has_sse42: false,
            has_avx: false,
            has_avx2: false,
            has_popcnt: false,
            has_neon: false,
            has_unaligned_access: false,
            vendor: "Unknown".to_string(),
            model: "Unknown".to_string(),
            logical_cores: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            cache_line_size: 64,
        }
    }

    /// Recommended buffer alignment for the widest available vector unit
    pub fn recommended_alignment(&self) -> usize {
        if self.has_avx2 {
            32
        } else if self.has_sse2 || self.has_neon {
            16
        } else {
            8
        }
    }

    /// Human-readable label for the widest usable tier, for logs
    pub fn simd_tier_label(&self) -> &'static str {
        if self.has_avx2 {
            "avx2"
        } else if self.has_sse2 {
            "sse2"
        } else if self.has_neon {
            "neon"
        } else {
            "scalar"
        }
    }
}

/// Detect features on the running CPU
fn detect_features() -> CpuFeatures {
    #[cfg(target_arch = "x86_64")]
    {
        detect_x86_features()
    }

    #[cfg(target_arch = "aarch64")]
    {
        detect_arm_features()
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        CpuFeatures::baseline()
    }
}

#[cfg(target_arch = "x86_64")]
fn detect_x86_features() -> CpuFeatures {
    let cpuid = raw_cpuid::CpuId::new();
    let mut features = CpuFeatures::baseline();

    if let Some(info) = cpuid.get_feature_info() {
        features.has_sse2 = info.has_sse2();
        features.has_sse41 = info.has_sse41();
        features.has_sse42 = info.has_sse42();
        features.has_avx = info.has_avx();
        features.has_popcnt = info.has_popcnt();
    }

    if let Some(extended) = cpuid.get_extended_feature_info() {
        features.has_avx2 = extended.has_avx2();
    }

    // Unaligned access is always acceptable on x86_64.
    features.has_unaligned_access = true;

    features.vendor = cpuid
        .get_vendor_info()
        .map(|v| v.as_str().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    features.model = cpuid
        .get_processor_brand_string()
        .map(|b| b.as_str().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    if let Some(cache_params) = cpuid.get_cache_parameters() {
        if let Some(cache) = cache_params.into_iter().next() {
            features.cache_line_size = cache.coherency_line_size() as usize;
        }
    }

    features
}

#[cfg(target_arch = "aarch64")]
fn detect_arm_features() -> CpuFeatures {
    let mut features = CpuFeatures::baseline();

    // NEON and unaligned access are standard on AArch64.
    features.has_neon = true;
    features.has_unaligned_access = true;
    features.vendor = "ARM".to_string();

    if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
        for line in cpuinfo.lines() {
            if line.starts_with("CPU implementer") && line.contains("0x51") {
                features.vendor = "Qualcomm".to_string();
            } else if line.starts_with("model name") {
                if let Some(name) = line.split(':').nth(1) {
                    features.model = name.trim().to_string();
                }
            }
        }
    }

    features
}

// Detection runs once; every later call reuses the cached set.
static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Get the global CPU feature set (detected on first call)
pub fn get_cpu_features() -> &'static CpuFeatures {
    CPU_FEATURES.get_or_init(detect_features)
}
