mod common;

mod tests {
    use is31fl3197::registers as reg;
    use is31fl3197::{Channel, Error, Is31fl3197, OperatingMode, Rgb, Scope};

    use crate::common::MockBus;

    #[test]
    fn test_pattern_mode_rejected_for_white() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        let result = chip.set_mode(OperatingMode::Pattern, Scope::single(Channel::White));
        assert_eq!(result, Err(Error::UnsupportedOperation));
        assert_eq!(bus.write_count(), 0);

        let result = chip.set_mode(OperatingMode::Pattern, Scope::ALL);
        assert_eq!(result, Err(Error::UnsupportedOperation));
        assert_eq!(bus.write_count(), 0);
    }

    #[test]
    fn test_pattern_mode_preserves_white_bits() {
        let bus = MockBus::new();
        // White parked in current-limit-only mode beforehand.
        bus.set_reg(reg::OP_MODE, 0b1100_0000);

        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_mode(OperatingMode::Pattern, Scope::RGB).unwrap();
        assert_eq!(bus.reg(reg::OP_MODE), 0b1101_0101);

        chip.set_mode(OperatingMode::PwmCurrentLimit, Scope::RGB)
            .unwrap();
        assert_eq!(bus.reg(reg::OP_MODE), 0b1100_0000);
    }

    #[test]
    fn test_single_channel_mode_touches_one_field() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_mode(OperatingMode::CurrentLimitOnly, Scope::single(Channel::Green))
            .unwrap();
        assert_eq!(bus.reg(reg::OP_MODE), 0b0000_1100);
    }

    #[test]
    fn test_current_band_encoding() {
        let bus = MockBus::new();
        bus.set_reg(reg::CURRENT_BAND, 0b1100_0000);

        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_current_band(Scope::RGB, 3).unwrap();
        assert_eq!(bus.reg(reg::CURRENT_BAND), 0b1110_1010);
    }

    #[test]
    fn test_current_band_out_of_range_writes_nothing() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        assert_eq!(
            chip.set_current_band(Scope::RGB, 0),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            chip.set_current_band(Scope::RGB, 5),
            Err(Error::InvalidParameter)
        );
        assert_eq!(bus.write_count(), 0);
    }

    #[test]
    fn test_set_intensity_writes_scope_and_latches() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_intensity(Scope::RGB, 128).unwrap();
        assert_eq!(
            bus.writes(),
            vec![
                (reg::INTENSITY_BASE, 128),
                (reg::INTENSITY_BASE + 1, 128),
                (reg::INTENSITY_BASE + 2, 128),
                (reg::COLOR_UPDATE, reg::UPDATE_KEY),
            ]
        );
    }

    #[test]
    fn test_set_pwm_writes_high_byte_first() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_pwm(Scope::single(Channel::Red), 1023).unwrap();
        assert_eq!(
            bus.writes(),
            vec![
                (reg::PWM_BASE + 1, 0x03),
                (reg::PWM_BASE, 0xFF),
                (reg::PWM_UPDATE, reg::UPDATE_KEY),
            ]
        );
    }

    #[test]
    fn test_set_pwm_out_of_range() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        assert_eq!(
            chip.set_pwm(Scope::RGB, 4096),
            Err(Error::InvalidParameter)
        );
        assert_eq!(bus.write_count(), 0);
    }

    #[test]
    fn test_dim_compounds_on_last_intensity() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_intensity(Scope::single(Channel::Red), 200).unwrap();

        chip.dim(Scope::single(Channel::Red), 50).unwrap();
        assert_eq!(bus.reg(reg::INTENSITY_BASE), 100);

        chip.dim(Scope::single(Channel::Red), 50).unwrap();
        assert_eq!(bus.reg(reg::INTENSITY_BASE), 50);

        assert_eq!(
            chip.dim(Scope::single(Channel::Red), 101),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_led_on_drives_everything_to_max() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.led_on(Scope::single(Channel::Blue)).unwrap();

        assert_eq!(bus.reg(reg::OP_MODE), 0);
        assert_eq!(bus.reg(reg::INTENSITY_BASE + 2), 255);
        assert_eq!(bus.reg(reg::PWM_BASE + 5), 0x0F);
        assert_eq!(bus.reg(reg::PWM_BASE + 4), 0xFF);
        assert_eq!(bus.reg(reg::CURRENT_BAND), 0b0011_0000);
    }

    #[test]
    fn test_set_color_spreads_over_channels() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.set_color(Rgb::new(10, 20, 30)).unwrap();

        assert_eq!(bus.reg(reg::INTENSITY_BASE), 10);
        assert_eq!(bus.reg(reg::INTENSITY_BASE + 1), 20);
        assert_eq!(bus.reg(reg::INTENSITY_BASE + 2), 30);
        // Full duty on all three channels, full current band.
        assert_eq!(bus.reg(reg::PWM_BASE), 0xFF);
        assert_eq!(bus.reg(reg::PWM_BASE + 1), 0x0F);
        assert_eq!(bus.reg(reg::CURRENT_BAND), 0b0011_1111);
    }

    #[test]
    fn test_init_resets_and_enables_outputs() {
        let bus = MockBus::new();
        let mut chip = Is31fl3197::new(bus.clone());
        chip.init().unwrap();
        assert_eq!(
            bus.writes(),
            vec![
                (reg::RESET, reg::RESET_KEY),
                (reg::SHUTDOWN_CTRL, reg::OUTPUT_ENABLE_ALL),
            ]
        );
    }

    #[test]
    fn test_init_reports_missing_device() {
        let bus = MockBus::new();
        bus.set_fail(true);
        let mut chip = Is31fl3197::new(bus.clone());
        assert_eq!(chip.init(), Err(Error::DeviceNotFound));
    }
}
