//! EVEX forms that cannot encode `k0` as their opmask register.
//!
//! Gathers, scatters and gather/scatter prefetches use the opmask as a
//! completion mask, `{k0}` is `#UD` for all of them. Any new form of these
//! families must be added here by hand.

use crate::{code::*, Code};

#[rustfmt::skip]
pub(crate) fn requires_non_zero_op_mask(code: Code) -> bool {
    matches!(
        code,
        EVEX_VPGATHERDD_XMM_K1_VM32X
        | EVEX_VPGATHERDD_YMM_K1_VM32Y
        | EVEX_VPGATHERDD_ZMM_K1_VM32Z
        | EVEX_VPGATHERDQ_XMM_K1_VM32X
        | EVEX_VPGATHERDQ_YMM_K1_VM32X
        | EVEX_VPGATHERDQ_ZMM_K1_VM32Y
        | EVEX_VPGATHERQD_XMM_K1_VM64X
        | EVEX_VPGATHERQD_XMM_K1_VM64Y
        | EVEX_VPGATHERQD_YMM_K1_VM64Z
        | EVEX_VPGATHERQQ_XMM_K1_VM64X
        | EVEX_VPGATHERQQ_YMM_K1_VM64Y
        | EVEX_VPGATHERQQ_ZMM_K1_VM64Z
        | EVEX_VGATHERDPS_XMM_K1_VM32X
        | EVEX_VGATHERDPS_YMM_K1_VM32Y
        | EVEX_VGATHERDPS_ZMM_K1_VM32Z
        | EVEX_VGATHERDPD_XMM_K1_VM32X
        | EVEX_VGATHERDPD_YMM_K1_VM32X
        | EVEX_VGATHERDPD_ZMM_K1_VM32Y
        | EVEX_VGATHERQPS_XMM_K1_VM64X
        | EVEX_VGATHERQPS_XMM_K1_VM64Y
        | EVEX_VGATHERQPS_YMM_K1_VM64Z
        | EVEX_VGATHERQPD_XMM_K1_VM64X
        | EVEX_VGATHERQPD_YMM_K1_VM64Y
        | EVEX_VGATHERQPD_ZMM_K1_VM64Z

        | EVEX_VPSCATTERDD_VM32X_K1_XMM
        | EVEX_VPSCATTERDD_VM32Y_K1_YMM
        | EVEX_VPSCATTERDD_VM32Z_K1_ZMM
        | EVEX_VPSCATTERDQ_VM32X_K1_XMM
        | EVEX_VPSCATTERDQ_VM32X_K1_YMM
        | EVEX_VPSCATTERDQ_VM32Y_K1_ZMM
        | EVEX_VPSCATTERQD_VM64X_K1_XMM
        | EVEX_VPSCATTERQD_VM64Y_K1_XMM
        | EVEX_VPSCATTERQD_VM64Z_K1_YMM
        | EVEX_VPSCATTERQQ_VM64X_K1_XMM
        | EVEX_VPSCATTERQQ_VM64Y_K1_YMM
        | EVEX_VPSCATTERQQ_VM64Z_K1_ZMM
        | EVEX_VSCATTERDPS_VM32X_K1_XMM
        | EVEX_VSCATTERDPS_VM32Y_K1_YMM
        | EVEX_VSCATTERDPS_VM32Z_K1_ZMM
        | EVEX_VSCATTERDPD_VM32X_K1_XMM
        | EVEX_VSCATTERDPD_VM32X_K1_YMM
        | EVEX_VSCATTERDPD_VM32Y_K1_ZMM
        | EVEX_VSCATTERQPS_VM64X_K1_XMM
        | EVEX_VSCATTERQPS_VM64Y_K1_XMM
        | EVEX_VSCATTERQPS_VM64Z_K1_YMM
        | EVEX_VSCATTERQPD_VM64X_K1_XMM
        | EVEX_VSCATTERQPD_VM64Y_K1_YMM
        | EVEX_VSCATTERQPD_VM64Z_K1_ZMM

        | EVEX_VGATHERPF0DPS_VM32Z_K1
        | EVEX_VGATHERPF0DPD_VM32Y_K1
        | EVEX_VGATHERPF0QPS_VM64Z_K1
        | EVEX_VGATHERPF0QPD_VM64Z_K1
        | EVEX_VGATHERPF1DPS_VM32Z_K1
        | EVEX_VGATHERPF1DPD_VM32Y_K1
        | EVEX_VGATHERPF1QPS_VM64Z_K1
        | EVEX_VGATHERPF1QPD_VM64Z_K1
        | EVEX_VSCATTERPF0DPS_VM32Z_K1
        | EVEX_VSCATTERPF0DPD_VM32Y_K1
        | EVEX_VSCATTERPF0QPS_VM64Z_K1
        | EVEX_VSCATTERPF0QPD_VM64Z_K1
        | EVEX_VSCATTERPF1DPS_VM32Z_K1
        | EVEX_VSCATTERPF1DPD_VM32Y_K1
        | EVEX_VSCATTERPF1QPS_VM64Z_K1
        | EVEX_VSCATTERPF1QPD_VM64Z_K1
    )
}
