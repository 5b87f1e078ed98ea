// Selects one of two items depending on the digit width of the target:
// the first arm is compiled on 32-bit targets (28-bit digits), the second
// on 64-bit targets (60-bit digits).
macro_rules! cfg_digit {
    ($item32:item $item64:item) => {
        #[cfg(not(target_pointer_width = "64"))]
        $item32
        #[cfg(target_pointer_width = "64")]
        $item64
    };
}

// Forwards the value/reference impl matrix of a binary operator to the
// `&BigInt op &BigInt` base impl defined next to the kernel.
macro_rules! forward_all_binop_to_ref_ref {
    (impl $imp:ident for BigInt, $method:ident) => {
        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, other: BigInt) -> BigInt {
                $imp::$method(&self, &other)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, other: &BigInt) -> BigInt {
                $imp::$method(&self, other)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, other: BigInt) -> BigInt {
                $imp::$method(self, &other)
            }
        }
    };
}

// Forwards `op BigInt` compound assignment to the `op &BigInt` impl.
macro_rules! forward_val_assign {
    (impl $imp:ident for BigInt, $method:ident) => {
        impl $imp<BigInt> for BigInt {
            #[inline]
            fn $method(&mut self, other: BigInt) {
                self.$method(&other);
            }
        }
    };
}
