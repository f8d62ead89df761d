//! Constructors for commonly repeated task-parameter subtrees

use super::distribution::Distribution;
use super::parameters::{
    AudioControl, MovableSpoutControl, OdorControl, OperationControl, PositionControl,
    RenderSpecification, TreadmillSpecification, VirtualSiteGenerator, VirtualSiteLabel,
};

/// Rig settings shared by most stages.
pub fn default_operation_control(time_to_collect: f64, velocity_threshold: f64) -> OperationControl {
    OperationControl {
        movable_spout_control: MovableSpoutControl {
            enabled: false,
            time_to_collect_after_reward: time_to_collect,
        },
        audio_control: AudioControl { duration: 0.2, frequency: 9999.0 },
        odor_control: OdorControl { valve_max_open_time: 10.0 },
        position_control: PositionControl {
            frequency_filter_cutoff: 5.0,
            velocity_threshold,
        },
    }
}

pub fn reward_site(length_distribution: Distribution) -> VirtualSiteGenerator {
    site(VirtualSiteLabel::RewardSite, 0.5, length_distribution)
}

pub fn inter_site(length_distribution: Distribution) -> VirtualSiteGenerator {
    site(VirtualSiteLabel::InterSite, 0.5, length_distribution)
}

pub fn inter_patch(length_distribution: Distribution) -> VirtualSiteGenerator {
    site(VirtualSiteLabel::InterPatch, 0.5, length_distribution)
}

/// A site generator with the given contrast and no treadmill friction.
pub fn site(
    label: VirtualSiteLabel,
    contrast: f64,
    length_distribution: Distribution,
) -> VirtualSiteGenerator {
    VirtualSiteGenerator {
        label,
        render_specification: RenderSpecification { contrast },
        length_distribution,
        treadmill_specification: Some(TreadmillSpecification {
            friction: Distribution::scalar(0.0),
        }),
    }
}
